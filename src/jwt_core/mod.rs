pub mod codec;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub mod signer;
pub(crate) mod verifier;
