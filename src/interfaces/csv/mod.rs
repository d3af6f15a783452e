pub mod command_reader;
pub mod response_writer;
