pub mod charset;
pub mod error;
pub mod generator;
pub mod keystream;

pub use charset::{CharacterClass, ClassSet, GenerationRequest};
pub use error::GenerateError;
pub use generator::{generate, generate_with};
pub use keystream::Keystream;
