pub mod diamond;
pub mod fanout;
