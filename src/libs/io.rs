use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `input` for buffered reading. `stdin` reads standard input; a `.gz`
/// suffix is decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = mashmat::reader("tests/mash/Dist.tab").unwrap();
/// assert_eq!(reader.lines().count(), 4);
/// ```
pub fn reader(input: &str) -> std::io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("could not open {}: {}", path.display(), e))
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> std::io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

/// Reads a list of paths, one per line. Blank lines and `#` comments are skipped.
pub fn read_list(input: &str) -> std::io::Result<Vec<String>> {
    let mut list = vec![];
    for line in reader(input)?.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        list.push(line.to_string());
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("genomes.lst");
        std::fs::write(&file, "# genomes\na.fna\n\n  b.fna  \n").unwrap();

        let list = read_list(file.to_str().unwrap()).unwrap();
        assert_eq!(list, vec!["a.fna".to_string(), "b.fna".to_string()]);
    }

    #[test]
    fn test_reader_missing() {
        let err = reader("tests/mash/not_there.tab").err().unwrap();
        assert!(err.to_string().contains("not_there.tab"));
    }
}
