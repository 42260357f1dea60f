pub mod ai;
pub mod docintel;
pub mod ocr;
