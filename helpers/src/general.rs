use std::error::Error;
use std::fmt;

/// InputValueError is used if some replay option or parameter does not fulfill the posed
/// requirements, e.g., a frame delay outside the accepted range or a team without a color.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// max returns the maximum value in the array x (None for an empty array).
pub fn max<T: PartialOrd + Copy>(x: &[T]) -> Option<T> {
    let (first, rest) = x.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |val_max, &val| if val_max > val { val_max } else { val }),
    )
}

/// min returns the minimum value in the array x (None for an empty array).
pub fn min<T: PartialOrd + Copy>(x: &[T]) -> Option<T> {
    let (first, rest) = x.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |val_min, &val| if val_min < val { val_min } else { val }),
    )
}
