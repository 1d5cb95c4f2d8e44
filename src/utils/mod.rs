use std::io::{BufReader, Read};

use serde::de::DeserializeOwned;

mod macros;

pub fn toml_from_reader<R, T>(reader: R) -> anyhow::Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);
    let mut data = String::with_capacity(64 * 1024);
    reader.read_to_string(&mut data)?;
    Ok(toml::from_str(&data)?)
}

/// Sums hours, ignoring values that are not finite.
#[must_use]
pub fn sum_hours<I: IntoIterator<Item = f64>>(hours: I) -> f64 {
    hours.into_iter().filter(|hours| hours.is_finite()).sum()
}
