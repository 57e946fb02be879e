use std::io::{self, Read};

use log::{debug, info};

use crate::config::TRIANGLE_EXTENSION;
use crate::error::{CrystalliteError, Result};
use crate::interfaces::Verbosity;
use crate::triangles::triangle_mesh::{Triangle, TriangleMesh};
use crate::utils::{expand_home, open_with_fallback};

/// Load a triangle file: one `a b c` integer triple per non-empty line, no header.
///
/// The literal name is tried first, then the name with `.tri` appended.
/// Blank lines are skipped; error line numbers refer to physical file lines.
pub fn load_triangle_file(name: &str, verbosity: Verbosity) -> Result<TriangleMesh> {
    let (path, mut file) = open_with_fallback(&expand_home(name), TRIANGLE_EXTENSION)?;
    if verbosity.is_verbose() {
        info!("loading external crystallite triangles file '{}'", path.display());
    }

    let mut content = String::new();
    file.read_to_string(&mut content).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            CrystalliteError::config_file(path.display().to_string(), "file is not valid UTF-8")
        } else {
            CrystalliteError::io(&path, source)
        }
    })?;

    // First pass fixes the triangle count
    let count = content.lines().filter(|line| !line.trim().is_empty()).count();
    debug!("{} triangles in '{}'", count, path.display());

    let origin = path.display().to_string();
    let mut triangles = Vec::with_capacity(count);
    for (offset, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let triangle = parse_triangle(line).ok_or_else(|| {
            CrystalliteError::config(&origin, offset + 1, format!("can not read 3 integers from '{}'", line.trim()))
        })?;
        if verbosity.is_verbose() {
            info!(
                "{:5} {:5} {:5} {:5}",
                triangles.len() + 1,
                triangle.a,
                triangle.b,
                triangle.c
            );
        }
        triangles.push(triangle);
    }

    Ok(TriangleMesh::new(triangles))
}

fn parse_triangle(line: &str) -> Option<Triangle> {
    let mut tokens = line.split_whitespace().map(|token| token.parse::<i64>());
    let a = tokens.next()?.ok()?;
    let b = tokens.next()?.ok()?;
    let c = tokens.next()?.ok()?;
    match tokens.next() {
        None => Some(Triangle::new(a, b, c)),
        Some(_) => None,
    }
}
