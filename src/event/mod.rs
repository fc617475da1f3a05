/// One full fetch-and-patch pass over the portfolio
pub mod refresh;
