use std::io::{self, Write};

use serde::Serialize;

use crate::error::CliError;

/// Write `value` to stdout as one JSON document followed by a newline.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value, pretty)
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn compact_output_is_one_line() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({ "bars": 2 }), false).expect("write");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "{\"bars\":2}\n");
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({ "bars": 2 }), true).expect("write");
        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "{\n  \"bars\": 2\n}\n"
        );
    }
}
