use crate::domain::command::CommandHeader;
use crate::domain::status::StatusWord;
use crate::error::Result;
use crate::infrastructure::in_memory::ResponseApdu;
use serde::Serialize;
use std::io::Write;

/// Output encodings for replayed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResponseFormat {
    #[default]
    Csv,
    Json,
}

/// One replayed command and what the wallet answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRecord {
    pub cla: String,
    pub ins: String,
    pub sw: StatusWord,
    pub data: String,
}

impl ResponseRecord {
    pub fn new(header: &CommandHeader, response: &ResponseApdu) -> Self {
        Self {
            cla: format!("{:02X}", header.cla),
            ins: format!("{:02X}", header.ins),
            sw: response.status,
            data: hex::encode_upper(&response.data),
        }
    }
}

/// Writes response records as CSV (`cla,ins,sw,data`) or as a JSON array.
pub struct ResponseWriter<W: Write> {
    writer: W,
    format: ResponseFormat,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W, format: ResponseFormat) -> Self {
        Self { writer, format }
    }

    pub fn write_responses(&mut self, records: &[ResponseRecord]) -> Result<()> {
        match self.format {
            ResponseFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(&mut self.writer);
                // Header must appear even when the script was empty.
                if records.is_empty() {
                    wtr.write_record(["cla", "ins", "sw", "data"])?;
                }
                for record in records {
                    wtr.serialize(record)?;
                }
                wtr.flush()?;
            }
            ResponseFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, records)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::CommandApdu;

    fn records() -> Vec<ResponseRecord> {
        let get_balance = CommandApdu::from_bytes(&[0xB0, 0x50, 0x00, 0x00, 0x02]).unwrap();
        let debit = CommandApdu::from_bytes(&[0xB0, 0x40, 0x00, 0x00, 0x01, 0x01]).unwrap();
        vec![
            ResponseRecord::new(
                get_balance.header(),
                &ResponseApdu {
                    data: vec![0x00, 0x7F],
                    status: StatusWord::NO_ERROR,
                },
            ),
            ResponseRecord::new(
                debit.header(),
                &ResponseApdu {
                    data: Vec::new(),
                    status: StatusWord::NEGATIVE_BALANCE,
                },
            ),
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output, ResponseFormat::Csv)
            .write_responses(&records())
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "cla,ins,sw,data\nB0,50,9000,007F\nB0,40,6A85,\n");
    }

    #[test]
    fn test_write_csv_empty() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output, ResponseFormat::Csv)
            .write_responses(&[])
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "cla,ins,sw,data\n");
    }

    #[test]
    fn test_write_json() {
        let mut output = Vec::new();
        ResponseWriter::new(&mut output, ResponseFormat::Json)
            .write_responses(&records())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["sw"], "9000");
        assert_eq!(value[0]["data"], "007F");
        assert_eq!(value[1]["sw"], "6A85");
        assert_eq!(value[1]["data"], "");
    }
}
