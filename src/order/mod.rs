//! Order rows: creation checks and the immutability rule.

pub mod entity;
