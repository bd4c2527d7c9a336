//! Newtypes shared by all layers. Each one is stored as a plain postgres
//! column, so they carry their own diesel conversions.
use std::fmt;
use std::io::Write;

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::{Uuid as SqlUuid, VarChar};
use uuid::Uuid;

/// Opaque coupon identifier, assigned once at creation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[sql_type = "SqlUuid"]
pub struct CouponId(pub Uuid);

impl CouponId {
    pub fn new() -> Self {
        CouponId(Uuid::new_v4())
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql<SqlUuid, Pg> for CouponId {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
        ToSql::<SqlUuid, Pg>::to_sql(&self.0, out)
    }
}

impl FromSql<SqlUuid, Pg> for CouponId {
    fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
        FromSql::<SqlUuid, Pg>::from_sql(bytes).map(CouponId)
    }
}

/// Discount code as typed by the community
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[sql_type = "VarChar"]
pub struct CouponCode(pub String);

impl CouponCode {
    /// Codes are compared and stored in upper case
    pub fn canonical(&self) -> Self {
        CouponCode(self.0.trim().to_uppercase())
    }
}

impl From<String> for CouponCode {
    fn from(code: String) -> Self {
        CouponCode(code)
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql<VarChar, Pg> for CouponCode {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
        ToSql::<VarChar, Pg>::to_sql(&self.0, out)
    }
}

impl FromSql<VarChar, Pg> for CouponCode {
    fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
        FromSql::<VarChar, Pg>::from_sql(bytes).map(CouponCode)
    }
}

/// Merchant domain, e.g. `nike.com`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, FromSqlRow, AsExpression)]
#[sql_type = "VarChar"]
pub struct StoreDomain(pub String);

impl StoreDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for StoreDomain {
    fn from(domain: &'a str) -> Self {
        StoreDomain(domain.to_string())
    }
}

impl From<String> for StoreDomain {
    fn from(domain: String) -> Self {
        StoreDomain(domain)
    }
}

impl fmt::Display for StoreDomain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql<VarChar, Pg> for StoreDomain {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
        ToSql::<VarChar, Pg>::to_sql(&self.0, out)
    }
}

impl FromSql<VarChar, Pg> for StoreDomain {
    fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
        FromSql::<VarChar, Pg>::from_sql(bytes).map(StoreDomain)
    }
}
