pub mod term_bank;
