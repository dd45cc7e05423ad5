use std::io::{self, Read};
use std::{fs, path::Path};

/// Reads a whole game record, from standard input unless a path is given.
pub fn read(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
