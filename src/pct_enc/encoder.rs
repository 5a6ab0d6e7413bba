//! Percent-encoders for URI components.

use super::{table::*, Encoder};

/// An encoder for userinfo.
#[derive(Debug)]
pub struct Userinfo(());

impl Encoder for Userinfo {
    const TABLE: Table = USERINFO;
}

/// An encoder for the user name, i.e. userinfo before the first colon.
#[derive(Debug)]
pub struct User(());

impl Encoder for User {
    const TABLE: Table = USER;
}

/// An encoder for registered name.
#[derive(Debug)]
pub struct RegName(());

impl Encoder for RegName {
    const TABLE: Table = REG_NAME;
}

/// An encoder for path.
#[derive(Debug)]
pub struct Path(());

impl Encoder for Path {
    const TABLE: Table = PATH;
}

/// An encoder for query.
#[derive(Debug)]
pub struct Query(());

impl Encoder for Query {
    const TABLE: Table = QUERY;
}

/// An encoder for fragment.
#[derive(Debug)]
pub struct Fragment(());

impl Encoder for Fragment {
    const TABLE: Table = FRAGMENT;
}
