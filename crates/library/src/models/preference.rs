/// A preference value as it exists in a key-value store at runtime.
///
/// Wider than the transport schema: stores can hold kinds a backup has no
/// representation for. The snapshot filter maps the six supported kinds and
/// silently drops the rest, so this enum is where "unsupported" becomes
/// observable.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPreference {
    Int(i32),
    Long(i64),
    Float(f32),
    Str(String),
    Bool(bool),
    StringSet(Vec<String>),
    /// Opaque binary state. Not representable in a backup; dropped at
    /// snapshot time.
    Blob(Vec<u8>),
}
