/// RFC 7396 merge patches built from sparse patch structs.
pub mod merge_patch;
/// Collection envelopes and `next` cursor extraction.
pub mod pager;
/// Discriminator-driven decoding of closed variant families.
pub mod polymorphic;
pub(crate) mod request;
/// Status, headers and decoded body of a completed call.
pub mod response;
