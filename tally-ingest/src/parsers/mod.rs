pub mod cashback;
