//! The contract every convertible record type implements.

use crate::descriptor::Field;
use crate::schema::RecordSchema;

/// A plain-data type with an ordered table of field descriptors.
///
/// Implementations are usually three lines: the type name and a
/// [`fields!`](crate::fields) invocation listing [`field!`](crate::field)
/// builders in declaration order.
///
/// ```
/// use docmap::{Record, field, fields};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Record for Server {
///     const TYPE_NAME: &'static str = "Server";
///     fields!(Server => [
///         field!(Server, host).mandatory(),
///         field!(Server, port).alias("config:listen_port"),
///     ]);
/// }
///
/// let names: Vec<_> = Server::fields().iter().map(|field| field.name()).collect();
/// assert_eq!(names, ["host", "port"]);
/// ```
pub trait Record: Default + Sized + 'static {
    /// Name used for this type in generated code and XML roots.
    const TYPE_NAME: &'static str;

    /// Descriptors in declaration order, shared by every instance.
    fn fields() -> &'static [Field<Self>];

    /// Language-neutral description of the record's shape.
    #[must_use]
    fn schema() -> RecordSchema {
        RecordSchema {
            type_name: Self::TYPE_NAME,
            fields: Self::fields().iter().map(Field::schema).collect(),
        }
    }
}
