//! Column-name mapping for the tabular boundary.

/// Maps canonical participant fields to the header names used in the input
/// file. The output report reuses the same names and order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            first_name: "firstName".to_string(),
            last_name: "lastName".to_string(),
            email: "email".to_string(),
        }
    }
}

impl ColumnMap {
    /// Header row in canonical field order.
    #[must_use]
    pub fn header(&self) -> [&str; 3] {
        [&self.first_name, &self.last_name, &self.email]
    }
}
