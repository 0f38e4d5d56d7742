use bevy::prelude::*;
use tilenav::{NavError, NavResult};

/// Generic parser for delimited strings of integers
pub fn parse_delimited<const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
) -> NavResult<[i32; N]> {
    let parts: Vec<&str> = input.split(delimiter).collect();
    if parts.len() != N {
        return Err(NavError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [0; N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = part.trim().parse().map_err(|_| NavError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> NavResult<(u32, u32)> {
    let [width, height] = parse_delimited::<2>(size_str, 'x', "size")?;

    if width <= 0 || height <= 0 {
        return Err(NavError::InvalidArgument {
            reason: "Width and height must be greater than 0".to_string(),
        });
    }

    if width > 4096 || height > 4096 {
        return Err(NavError::InvalidArgument {
            reason: "Width and height must not exceed 4096".to_string(),
        });
    }

    Ok((width as u32, height as u32))
}

/// Parse a pixel extent "WIDTHxHEIGHT"; zero is allowed
pub fn parse_extent(extent_str: &str) -> NavResult<IVec2> {
    let [x, y] = parse_delimited::<2>(extent_str, 'x', "extent")?;
    if x < 0 || y < 0 {
        return Err(NavError::InvalidArgument {
            reason: format!("Extent '{extent_str}' must not be negative"),
        });
    }
    Ok(IVec2::new(x, y))
}

/// Footprint `(ul, dr)` of an agent of `size` anchored at its centre
pub fn centred_footprint(size: IVec2) -> (IVec2, IVec2) {
    let ul = -size / 2;
    (ul, ul + size)
}

/// Validate blocked-tile density and clamp to valid range
pub fn validate_density(density: f32) -> f32 {
    if !(0.0..=1.0).contains(&density) {
        println!(
            "Warning: Tile density {density} is out of range [0.0, 1.0], clamping to valid range"
        );
        density.clamp(0.0, 1.0)
    } else {
        density
    }
}

/// Reject level file names that would escape the levels directory
pub fn validate_output_path(filename: &str) -> NavResult<()> {
    let path = std::path::Path::new(filename);
    if path.is_absolute() {
        return Err(NavError::InvalidArgument {
            reason: format!(
                "Output path must be relative to the levels directory, got absolute path: {filename}"
            ),
        });
    }

    if filename.contains("..") {
        return Err(NavError::InvalidArgument {
            reason: "Output path cannot contain '..'".to_string(),
        });
    }

    Ok(())
}
