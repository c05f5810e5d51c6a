//! Category registry: the permissible values of each categorical attribute.
//!
//! Value order is load-bearing. It fixes the order of the indicator columns
//! inside each one-hot block, and the trained model depends on that order.

use crate::domain::{AttributeRecord, CategoricalAttribute, NumericAttribute};

pub const WORKCLASS: &[&str] = &[
    "Private",
    "Self-emp-not-inc",
    "Self-emp-inc",
    "Federal-gov",
    "Local-gov",
    "State-gov",
    "Without-pay",
    "Never-worked",
];

pub const EDUCATION: &[&str] = &[
    "Bachelors",
    "Some-college",
    "11th",
    "HS-grad",
    "Prof-school",
    "Assoc-acdm",
    "Assoc-voc",
    "9th",
    "7th-8th",
    "12th",
    "Masters",
    "1st-4th",
    "10th",
    "Doctorate",
    "5th-6th",
    "Preschool",
];

pub const MARITAL_STATUS: &[&str] = &[
    "Married-civ-spouse",
    "Divorced",
    "Never-married",
    "Separated",
    "Widowed",
    "Married-spouse-absent",
    "Married-AF-spouse",
];

pub const OCCUPATION: &[&str] = &[
    "Tech-support",
    "Craft-repair",
    "Other-service",
    "Sales",
    "Exec-managerial",
    "Prof-specialty",
    "Handlers-cleaners",
    "Machine-op-inspct",
    "Adm-clerical",
    "Farming-fishing",
    "Transport-moving",
    "Priv-house-serv",
    "Protective-serv",
    "Armed-Forces",
];

pub const RELATIONSHIP: &[&str] = &[
    "Wife",
    "Own-child",
    "Husband",
    "Not-in-family",
    "Other-relative",
    "Unmarried",
];

pub const RACE: &[&str] = &["White", "Asian-Pac-Islander", "Amer-Indian-Eskimo", "Other", "Black"];

pub const SEX: &[&str] = &["Female", "Male"];

pub const NATIVE_COUNTRY: &[&str] = &[
    "United-States",
    "Cambodia",
    "England",
    "Puerto-Rico",
    "Canada",
    "Germany",
    "Outlying-US(Guam-USVI-etc)",
    "India",
    "Japan",
    "Greece",
    "South",
    "China",
    "Cuba",
    "Iran",
    "Honduras",
    "Philippines",
    "Italy",
    "Poland",
    "Jamaica",
    "Vietnam",
    "Mexico",
    "Portugal",
    "Ireland",
    "France",
    "Dominican-Republic",
    "Laos",
    "Ecuador",
    "Taiwan",
    "Haiti",
    "Columbia",
    "Hungary",
    "Guatemala",
    "Nicaragua",
    "Scotland",
    "Thailand",
    "Yugoslavia",
    "El-Salvador",
    "Trinadad&Tobago",
    "Peru",
    "Hong",
    "Holand-Netherlands",
];

/// Ordered value sets for all categorical attributes.
///
/// Constructed explicitly and handed to the encoder and the form; there is no
/// process-wide instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    // Indexed by position in `CategoricalAttribute::ALL`.
    sets: [Vec<&'static str>; 8],
}

impl CategoryRegistry {
    /// The UCI Adult census categories the shipped model was trained on.
    pub fn census() -> Self {
        Self::from_sets([
            WORKCLASS.to_vec(),
            EDUCATION.to_vec(),
            MARITAL_STATUS.to_vec(),
            OCCUPATION.to_vec(),
            RELATIONSHIP.to_vec(),
            RACE.to_vec(),
            SEX.to_vec(),
            NATIVE_COUNTRY.to_vec(),
        ])
    }

    /// Build a registry from explicit value sets, one per attribute in
    /// `CategoricalAttribute::ALL` order.
    pub fn from_sets(sets: [Vec<&'static str>; 8]) -> Self {
        Self { sets }
    }

    pub fn values(&self, attr: CategoricalAttribute) -> &[&'static str] {
        &self.sets[slot(attr)]
    }

    pub fn position(&self, attr: CategoricalAttribute, value: &str) -> Option<usize> {
        self.values(attr).iter().position(|v| *v == value)
    }

    pub fn contains(&self, attr: CategoricalAttribute, value: &str) -> bool {
        self.position(attr, value).is_some()
    }

    /// Number of indicator columns the attribute expands to.
    pub fn block_width(&self, attr: CategoricalAttribute) -> usize {
        self.values(attr).len()
    }

    pub fn total_indicator_columns(&self) -> usize {
        self.sets.iter().map(Vec::len).sum()
    }

    /// A record holding every control's initial value: numeric defaults and
    /// the first value of each selector.
    pub fn default_record(&self) -> AttributeRecord {
        let first = |attr| self.values(attr).first().copied().unwrap_or_default().to_string();
        let default = |attr: NumericAttribute| attr.bounds().default as f64;
        AttributeRecord {
            age: default(NumericAttribute::Age),
            workclass: first(CategoricalAttribute::Workclass),
            fnlwgt: default(NumericAttribute::Fnlwgt),
            education: first(CategoricalAttribute::Education),
            education_num: default(NumericAttribute::EducationNum),
            marital_status: first(CategoricalAttribute::MaritalStatus),
            occupation: first(CategoricalAttribute::Occupation),
            relationship: first(CategoricalAttribute::Relationship),
            race: first(CategoricalAttribute::Race),
            sex: first(CategoricalAttribute::Sex),
            capital_gain: default(NumericAttribute::CapitalGain),
            capital_loss: default(NumericAttribute::CapitalLoss),
            hours_per_week: default(NumericAttribute::HoursPerWeek),
            native_country: first(CategoricalAttribute::NativeCountry),
        }
    }
}

fn slot(attr: CategoricalAttribute) -> usize {
    match attr {
        CategoricalAttribute::Workclass => 0,
        CategoricalAttribute::Education => 1,
        CategoricalAttribute::MaritalStatus => 2,
        CategoricalAttribute::Occupation => 3,
        CategoricalAttribute::Relationship => 4,
        CategoricalAttribute::Race => 5,
        CategoricalAttribute::Sex => 6,
        CategoricalAttribute::NativeCountry => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_block_widths() {
        let reg = CategoryRegistry::census();
        assert_eq!(reg.block_width(CategoricalAttribute::Workclass), 8);
        assert_eq!(reg.block_width(CategoricalAttribute::Education), 16);
        assert_eq!(reg.block_width(CategoricalAttribute::MaritalStatus), 7);
        assert_eq!(reg.block_width(CategoricalAttribute::Occupation), 14);
        assert_eq!(reg.block_width(CategoricalAttribute::Relationship), 6);
        assert_eq!(reg.block_width(CategoricalAttribute::Race), 5);
        assert_eq!(reg.block_width(CategoricalAttribute::Sex), 2);
        assert_eq!(reg.block_width(CategoricalAttribute::NativeCountry), 41);
        assert_eq!(reg.total_indicator_columns(), 99);
    }

    #[test]
    fn slots_follow_declaration_order() {
        for (i, attr) in CategoricalAttribute::ALL.into_iter().enumerate() {
            assert_eq!(slot(attr), i);
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        let reg = CategoryRegistry::census();
        assert_eq!(reg.position(CategoricalAttribute::Relationship, "Husband"), Some(2));
        assert!(!reg.contains(CategoricalAttribute::Sex, "male"));
        assert!(!reg.contains(CategoricalAttribute::Workclass, "?"));
    }

    #[test]
    fn default_record_uses_first_choice_and_numeric_defaults() {
        let rec = CategoryRegistry::census().default_record();
        assert_eq!(rec.workclass, "Private");
        assert_eq!(rec.sex, "Female");
        assert_eq!(rec.native_country, "United-States");
        assert_eq!(rec.age, 30.0);
        assert_eq!(rec.fnlwgt, 50_000.0);
        assert_eq!(rec.hours_per_week, 40.0);
    }
}
