//! Field descriptors: one per record member, built once per type.

use std::fmt;

use crate::alias::{self, AliasSpec, Lookup};
use crate::condition::{Condition, EncodeScope};
use crate::context::{DecodeContext, EncodeContext};
use crate::convert::{Decode, Describe, Encode};
use crate::document::{Node, Value};
use crate::format::Format;
use crate::presence::PresenceSet;
use crate::schema::{FieldSchema, ValueType};
use crate::DocResult;

/// Whether a missing key fails the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Absent keys leave the field untouched.
    #[default]
    Optional,
    /// Absent keys raise [`crate::DocError::MissingRequiredField`].
    Mandatory,
}

type DecodeFn<R> =
    Box<dyn Fn(&mut R, &dyn Node, &mut DecodeContext) -> DocResult<()> + Send + Sync>;
type EncodeFn<R> = Box<dyn Fn(&R, &EncodeContext<'_>) -> Value + Send + Sync>;

/// Descriptor for one member of record type `R`.
///
/// Carries no per-instance state: the typed accessors are plain function
/// pointers into `R`.
pub struct Field<R> {
    name: &'static str,
    alias: Option<AliasSpec>,
    policy: Policy,
    condition: Option<Condition>,
    decode: DecodeFn<R>,
    encode: EncodeFn<R>,
    describe: fn() -> ValueType,
}

impl<R: 'static> Field<R> {
    /// Describe the member reached through `get` and `get_mut`.
    ///
    /// Fields start optional, unaliased and unconditional. The [`field!`]
    /// macro fills in the accessors from a member name.
    ///
    /// [`field!`]: crate::field
    #[must_use]
    pub fn new<T>(name: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self
    where
        T: Decode + Encode + Describe + 'static,
    {
        Self {
            name,
            alias: None,
            policy: Policy::Optional,
            condition: None,
            decode: Box::new(move |record: &mut R, node: &dyn Node, cx: &mut DecodeContext| {
                get_mut(record).decode(node, cx)
            }),
            encode: Box::new(move |record: &R, cx: &EncodeContext<'_>| get(record).encode(cx)),
            describe: T::describe,
        }
    }
}

impl<R> Field<R> {
    /// Require the field in every format.
    #[must_use]
    pub const fn mandatory(mut self) -> Self {
        self.policy = Policy::Mandatory;
        self
    }

    /// Make the field optional, overriding an earlier [`Field::mandatory`].
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.policy = Policy::Optional;
        self
    }

    /// Attach an alias string (see [`crate::alias`] for the grammar).
    #[must_use]
    pub fn alias(mut self, spec: &'static str) -> Self {
        self.alias = Some(AliasSpec::parse(spec));
        self
    }

    /// Only write the field when `condition` holds.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Primary member name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared alias, if any.
    #[must_use]
    pub const fn alias_spec(&self) -> Option<&AliasSpec> {
        self.alias.as_ref()
    }

    /// Declared presence policy.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Declared emission condition, if any.
    #[must_use]
    pub const fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Whether decoding `format` requires the field, taking `,me` alias
    /// markers into account.
    #[must_use]
    pub fn is_mandatory(&self, format: Format) -> bool {
        self.policy == Policy::Mandatory
            || self
                .alias
                .as_ref()
                .is_some_and(|spec| spec.is_mandatory(format))
    }

    /// Read this field of `record` from the object `node`.
    ///
    /// Present keys are decoded into the field and recorded in `presence`
    /// under the primary name. Absent optional keys leave the field as it
    /// was.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocError::MissingRequiredField`] for an absent
    /// mandatory key, or whatever decoding the child raised.
    pub fn decode(
        &self,
        record: &mut R,
        node: &dyn Node,
        cx: &mut DecodeContext,
        presence: &mut PresenceSet,
    ) -> DocResult<()> {
        match alias::resolve_key(node, cx.format(), self.name, self.alias.as_ref()) {
            Lookup::Found { key, node: child } => {
                cx.with_key(key, |inner| (self.decode)(record, child, inner))?;
                presence.insert(self.name);
                Ok(())
            }
            Lookup::Absent { name, mandatory } => {
                if mandatory || self.policy == Policy::Mandatory {
                    tracing::debug!(field = name, path = %cx.path(), "mandatory field missing");
                    return Err(cx.missing(name));
                }
                tracing::trace!(field = self.name, path = %cx.path(), "optional field absent");
                Ok(())
            }
        }
    }

    /// Key and value of this field of `record`, or `None` when its
    /// condition does not hold in `scope`.
    #[must_use]
    pub fn encode(
        &self,
        record: &R,
        scope: &EncodeScope<'_>,
        cx: &EncodeContext<'_>,
    ) -> Option<(&'static str, Value)> {
        if self
            .condition
            .as_ref()
            .is_some_and(|condition| !condition.holds(scope))
        {
            tracing::trace!(field = self.name, "field suppressed by condition");
            return None;
        }
        let key = alias::write_name(cx.format(), self.name, self.alias.as_ref());
        Some((key, (self.encode)(record, cx)))
    }

    /// Schema entry for foreign code emitters.
    #[must_use]
    pub fn schema(&self) -> FieldSchema {
        FieldSchema {
            name: self.name,
            alias: self.alias.clone(),
            required: self.policy == Policy::Mandatory,
            conditional: self.condition.is_some(),
            value: (self.describe)(),
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("alias", &self.alias.as_ref().map(AliasSpec::as_str))
            .field("policy", &self.policy)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

/// Build a [`Field`] for a named member of a record type.
///
/// `field!(Person, name)` expands to
/// `Field::<Person>::new("name", |r| &r.name, |r| &mut r.name)`, so the
/// builder methods chain as usual:
///
/// ```ignore
/// field!(Person, id).mandatory().alias("_id")
/// ```
#[macro_export]
macro_rules! field {
    ($record:ty, $member:ident) => {
        $crate::Field::<$record>::new(
            stringify!($member),
            |record| &record.$member,
            |record| &mut record.$member,
        )
    };
}

/// Implement [`Record::fields`](crate::Record::fields) with a lazily built,
/// cached descriptor table.
///
/// Use inside an `impl Record for T` block, naming the concrete type.
#[macro_export]
macro_rules! fields {
    ($record:ty => [$($field:expr),* $(,)?]) => {
        fn fields() -> &'static [$crate::Field<$record>] {
            static FIELDS: ::std::sync::LazyLock<::std::vec::Vec<$crate::Field<$record>>> =
                ::std::sync::LazyLock::new(|| ::std::vec![$($field),*]);
            &FIELDS
        }
    };
}
