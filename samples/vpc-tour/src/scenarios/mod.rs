pub mod compute;
pub mod networking;
