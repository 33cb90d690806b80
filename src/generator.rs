use crate::charset::{ClassSet, GenerationRequest};
use crate::error::GenerateError;
use crate::keystream::Keystream;
use rand::Rng;
use rand::seq::SliceRandom;
use zeroize::Zeroizing;

/// Generates a password with at least one character from every enabled class.
///
/// Required characters are drawn first, the rest is filled from the combined
/// alphabet, then the whole sequence is shuffled with the same generator.
pub fn generate_with<R: Rng>(
    rng: &mut R,
    request: &GenerationRequest,
) -> Result<Zeroizing<String>, GenerateError> {
    let required = request.required();
    if request.length < required {
        return Err(GenerateError::InsufficientLength {
            length: request.length,
            required,
        });
    }

    let all_chars = request.classes.alphabet();
    let mut password_bytes = Zeroizing::new(Vec::with_capacity(request.length));

    for class in request.classes.iter() {
        let set = class.chars();
        password_bytes.push(set[rng.random_range(0..set.len())]);
    }

    while password_bytes.len() < request.length {
        password_bytes.push(all_chars[rng.random_range(0..all_chars.len())]);
    }

    password_bytes.shuffle(rng);

    let password: String = password_bytes.iter().map(|&b| b as char).collect();
    Ok(Zeroizing::new(password))
}

/// Seeds a fresh keystream from OS entropy and generates one password.
pub fn generate(
    length: usize,
    include_upper: bool,
    include_numbers: bool,
    include_special: bool,
) -> Result<Zeroizing<String>, GenerateError> {
    let request = GenerationRequest::new(
        length,
        ClassSet::from_flags(include_upper, include_numbers, include_special),
    );
    log::debug!(
        "generating password: length={}, required classes={:?}",
        request.length,
        request.classes.iter().map(|c| c.name()).collect::<Vec<_>>()
    );

    let mut rng = Keystream::from_entropy()?;
    generate_with(&mut rng, &request)
}
