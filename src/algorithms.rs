//! Prefix code strategies.
//!
//! Each strategy implements [`PrefixCoder`](crate::coder::PrefixCoder) and is listed in
//! [`ALL_CODERS`](crate::registered::ALL_CODERS).

pub mod huffman;
pub mod shannon_fano;
