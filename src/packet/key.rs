mod encryption;
mod public;
mod secret;
mod signing;

pub use self::{encryption::EncryptionSubkey, signing::SigningKey};
