use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const SCRIPT_HEADER: [&str; 6] = ["cla", "ins", "p1", "p2", "p3", "data"];

/// A credit of `amount` as a script row.
pub fn credit(amount: u8) -> [String; 6] {
    row("B0", "30", "01", &format!("{:02X}", amount))
}

/// A debit of `amount` as a script row.
pub fn debit(amount: u8) -> [String; 6] {
    row("B0", "40", "01", &format!("{:02X}", amount))
}

pub fn get_balance() -> [String; 6] {
    row("B0", "50", "02", "")
}

pub fn row(cla: &str, ins: &str, p3: &str, data: &str) -> [String; 6] {
    [cla, ins, "00", "00", p3, data].map(String::from)
}

pub fn write_script(path: &Path, rows: &[[String; 6]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(SCRIPT_HEADER)?;
    for r in rows {
        wtr.write_record(r)?;
    }

    wtr.flush()?;
    Ok(())
}

/// A script of `count` credits of `amount` followed by one balance query.
pub fn generate_credits(path: &Path, count: usize, amount: u8) -> Result<(), Error> {
    let mut rows: Vec<[String; 6]> = (0..count).map(|_| credit(amount)).collect();
    rows.push(get_balance());
    write_script(path, &rows)
}
