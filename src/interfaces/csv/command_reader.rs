use crate::domain::command::{CommandApdu, CommandHeader};
use crate::error::{Result, ScriptError};
use serde::Deserialize;
use std::io::Read;

/// One row of a command script. Every field is hex.
#[derive(Debug, Deserialize)]
struct ScriptRecord {
    cla: String,
    ins: String,
    p1: String,
    p2: String,
    p3: String,
    #[serde(default)]
    data: Option<String>,
}

impl TryFrom<ScriptRecord> for CommandApdu {
    type Error = ScriptError;

    fn try_from(record: ScriptRecord) -> Result<Self> {
        let header = CommandHeader {
            cla: parse_byte("cla", &record.cla)?,
            ins: parse_byte("ins", &record.ins)?,
            p1: parse_byte("p1", &record.p1)?,
            p2: parse_byte("p2", &record.p2)?,
            p3: parse_byte("p3", &record.p3)?,
        };
        let data = match record.data {
            Some(data) => parse_hex("data", &data)?,
            None => Vec::new(),
        };
        CommandApdu::new(header, data)
    }
}

/// Decodes hex, ignoring any whitespace between digits.
fn parse_hex(field: &'static str, value: &str) -> Result<Vec<u8>> {
    let digits: String = value.split_whitespace().collect();
    hex::decode(digits).map_err(|source| ScriptError::InvalidHex { field, source })
}

fn parse_byte(field: &'static str, value: &str) -> Result<u8> {
    match parse_hex(field, value)?.as_slice() {
        &[byte] => Ok(byte),
        other => Err(ScriptError::NotAByte {
            field,
            len: other.len(),
        }),
    }
}

/// Reads commands from a CSV script.
///
/// The script header is `cla,ins,p1,p2,p3,data`. Whitespace is trimmed and
/// the trailing `data` column may be left out for commands without data.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and decodes commands.
    ///
    /// A bad row yields an error and does not stop the iterator.
    pub fn commands(self) -> impl Iterator<Item = Result<CommandApdu>> {
        self.reader
            .into_deserialize::<ScriptRecord>()
            .map(|result| {
                result
                    .map_err(ScriptError::from)
                    .and_then(CommandApdu::try_from)
            })
    }
}
