//! Shared domain types.
//!
//! These types are intentionally kept small and plain so they can be:
//!
//! - filled in by the form, the CLI flags, or a CSV row
//! - encoded into the model's feature layout
//! - rendered back to the user

/// Numeric attributes, in the order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericAttribute {
    Age,
    Fnlwgt,
    EducationNum,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
}

/// Bounds and default of a numeric form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
    /// Increment used by `←/→` in the form.
    pub step: i64,
}

impl NumericBounds {
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

impl NumericAttribute {
    pub const ALL: [NumericAttribute; 6] = [
        NumericAttribute::Age,
        NumericAttribute::Fnlwgt,
        NumericAttribute::EducationNum,
        NumericAttribute::CapitalGain,
        NumericAttribute::CapitalLoss,
        NumericAttribute::HoursPerWeek,
    ];

    /// Column name used by the training pipeline.
    pub fn column_name(self) -> &'static str {
        match self {
            NumericAttribute::Age => "age",
            NumericAttribute::Fnlwgt => "fnlwgt",
            NumericAttribute::EducationNum => "education-num",
            NumericAttribute::CapitalGain => "capital-gain",
            NumericAttribute::CapitalLoss => "capital-loss",
            NumericAttribute::HoursPerWeek => "hours-per-week",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NumericAttribute::Age => "Age",
            NumericAttribute::Fnlwgt => "Final Weight",
            NumericAttribute::EducationNum => "Education Number",
            NumericAttribute::CapitalGain => "Capital Gain",
            NumericAttribute::CapitalLoss => "Capital Loss",
            NumericAttribute::HoursPerWeek => "Hours Per Week",
        }
    }

    pub fn bounds(self) -> NumericBounds {
        match self {
            NumericAttribute::Age => NumericBounds { min: 18, max: 100, default: 30, step: 1 },
            NumericAttribute::Fnlwgt => NumericBounds {
                min: 1,
                max: 1_000_000,
                default: 50_000,
                step: 1_000,
            },
            NumericAttribute::EducationNum => NumericBounds { min: 1, max: 16, default: 10, step: 1 },
            NumericAttribute::CapitalGain => NumericBounds {
                min: 0,
                max: 100_000,
                default: 0,
                step: 500,
            },
            NumericAttribute::CapitalLoss => NumericBounds {
                min: 0,
                max: 100_000,
                default: 0,
                step: 500,
            },
            NumericAttribute::HoursPerWeek => NumericBounds { min: 1, max: 100, default: 40, step: 1 },
        }
    }
}

/// Categorical attributes, in the order their indicator blocks appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalAttribute {
    Workclass,
    Education,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Sex,
    NativeCountry,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 8] = [
        CategoricalAttribute::Workclass,
        CategoricalAttribute::Education,
        CategoricalAttribute::MaritalStatus,
        CategoricalAttribute::Occupation,
        CategoricalAttribute::Relationship,
        CategoricalAttribute::Race,
        CategoricalAttribute::Sex,
        CategoricalAttribute::NativeCountry,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            CategoricalAttribute::Workclass => "workclass",
            CategoricalAttribute::Education => "education",
            CategoricalAttribute::MaritalStatus => "marital-status",
            CategoricalAttribute::Occupation => "occupation",
            CategoricalAttribute::Relationship => "relationship",
            CategoricalAttribute::Race => "race",
            CategoricalAttribute::Sex => "sex",
            CategoricalAttribute::NativeCountry => "native-country",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CategoricalAttribute::Workclass => "Workclass",
            CategoricalAttribute::Education => "Education",
            CategoricalAttribute::MaritalStatus => "Marital Status",
            CategoricalAttribute::Occupation => "Occupation",
            CategoricalAttribute::Relationship => "Relationship",
            CategoricalAttribute::Race => "Race",
            CategoricalAttribute::Sex => "Sex",
            CategoricalAttribute::NativeCountry => "Native Country",
        }
    }
}

/// Any of the 14 form attributes, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Numeric(NumericAttribute),
    Categorical(CategoricalAttribute),
}

impl Attribute {
    /// Order of the controls on the form (and of the original input dictionary).
    pub const FORM_ORDER: [Attribute; 14] = [
        Attribute::Numeric(NumericAttribute::Age),
        Attribute::Categorical(CategoricalAttribute::Workclass),
        Attribute::Numeric(NumericAttribute::Fnlwgt),
        Attribute::Categorical(CategoricalAttribute::Education),
        Attribute::Numeric(NumericAttribute::EducationNum),
        Attribute::Categorical(CategoricalAttribute::MaritalStatus),
        Attribute::Categorical(CategoricalAttribute::Occupation),
        Attribute::Categorical(CategoricalAttribute::Relationship),
        Attribute::Categorical(CategoricalAttribute::Race),
        Attribute::Categorical(CategoricalAttribute::Sex),
        Attribute::Numeric(NumericAttribute::CapitalGain),
        Attribute::Numeric(NumericAttribute::CapitalLoss),
        Attribute::Numeric(NumericAttribute::HoursPerWeek),
        Attribute::Categorical(CategoricalAttribute::NativeCountry),
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::Numeric(a) => a.column_name(),
            Attribute::Categorical(a) => a.column_name(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Attribute::Numeric(a) => a.display_name(),
            Attribute::Categorical(a) => a.display_name(),
        }
    }
}

/// One user's raw submission, before encoding.
///
/// Categorical values are free strings here: the form and the CLI restrict
/// them to the registry, but CSV rows may carry anything (e.g. `?`).
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    pub age: f64,
    pub workclass: String,
    pub fnlwgt: f64,
    pub education: String,
    pub education_num: f64,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub sex: String,
    pub capital_gain: f64,
    pub capital_loss: f64,
    pub hours_per_week: f64,
    pub native_country: String,
}

impl AttributeRecord {
    pub fn numeric(&self, attr: NumericAttribute) -> f64 {
        match attr {
            NumericAttribute::Age => self.age,
            NumericAttribute::Fnlwgt => self.fnlwgt,
            NumericAttribute::EducationNum => self.education_num,
            NumericAttribute::CapitalGain => self.capital_gain,
            NumericAttribute::CapitalLoss => self.capital_loss,
            NumericAttribute::HoursPerWeek => self.hours_per_week,
        }
    }

    pub fn set_numeric(&mut self, attr: NumericAttribute, value: f64) {
        match attr {
            NumericAttribute::Age => self.age = value,
            NumericAttribute::Fnlwgt => self.fnlwgt = value,
            NumericAttribute::EducationNum => self.education_num = value,
            NumericAttribute::CapitalGain => self.capital_gain = value,
            NumericAttribute::CapitalLoss => self.capital_loss = value,
            NumericAttribute::HoursPerWeek => self.hours_per_week = value,
        }
    }

    pub fn categorical(&self, attr: CategoricalAttribute) -> &str {
        match attr {
            CategoricalAttribute::Workclass => &self.workclass,
            CategoricalAttribute::Education => &self.education,
            CategoricalAttribute::MaritalStatus => &self.marital_status,
            CategoricalAttribute::Occupation => &self.occupation,
            CategoricalAttribute::Relationship => &self.relationship,
            CategoricalAttribute::Race => &self.race,
            CategoricalAttribute::Sex => &self.sex,
            CategoricalAttribute::NativeCountry => &self.native_country,
        }
    }

    pub fn set_categorical(&mut self, attr: CategoricalAttribute, value: impl Into<String>) {
        let value = value.into();
        match attr {
            CategoricalAttribute::Workclass => self.workclass = value,
            CategoricalAttribute::Education => self.education = value,
            CategoricalAttribute::MaritalStatus => self.marital_status = value,
            CategoricalAttribute::Occupation => self.occupation = value,
            CategoricalAttribute::Relationship => self.relationship = value,
            CategoricalAttribute::Race => self.race = value,
            CategoricalAttribute::Sex => self.sex = value,
            CategoricalAttribute::NativeCountry => self.native_country = value,
        }
    }
}

/// Fully numeric model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Binary income-bracket outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    BelowThreshold,
    AboveThreshold,
}

impl Label {
    /// Map a classifier class value to a label (`1` means above).
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Label::AboveThreshold
        } else {
            Label::BelowThreshold
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Label::AboveThreshold => ">50K",
            Label::BelowThreshold => "<=50K",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
