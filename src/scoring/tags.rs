//! Tag groups inspected by the completeness rules.

/// International Standard Book Number
pub const ISBN: &[&str] = &["020"];
/// Cataloging source
pub const CATALOGING_SOURCE: &[&str] = &["040"];
/// LC, NLM and local LC-type call numbers
pub const CLASSIFICATION: &[&str] = &["050", "060", "090"];
/// Main entries: personal, corporate, meeting name
pub const AUTHORS: &[&str] = &["100", "110", "111"];
/// Varying form of title
pub const ALT_TITLES: &[&str] = &["246"];
/// Edition statement
pub const EDITION: &[&str] = &["250"];
/// Publication, distribution, etc.
pub const IMPRINT: &[&str] = &["260", "264"];
/// Physical description
pub const PHYSICAL_DESCRIPTION: &[&str] = &["300"];
/// Formatted contents note
pub const TOC: &[&str] = &["505"];
/// Summary, etc.
pub const ABSTRACT: &[&str] = &["520"];
/// Subject access fields
pub const SUBJECTS: &[&str] = &["600", "610", "611", "630", "650", "651", "653"];
/// Added entries
pub const CONTRIBUTORS: &[&str] = &["700", "710", "711", "720"];
/// Series statements and series added entries
pub const SERIES: &[&str] = &["440", "490", "800", "810", "830"];
