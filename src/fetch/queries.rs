//! The fixed set of partner form queries.

/// Source of one query-string parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    /// A constant value.
    Literal(&'static str),
    /// The target enterprise id supplied for the run.
    EnterpriseId,
    /// The target requirement id supplied for the run.
    RequirementId,
}

/// Cross-reference ids merged into every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIds {
    /// Enterprise the records belong to (`QUERY_ID`).
    pub enterprise_id: String,
    /// Requirement being processed (`REQUIREMENT_ID`).
    pub requirement_id: String,
}

impl TargetIds {
    /// Creates a target id pair.
    pub fn new(enterprise_id: impl Into<String>, requirement_id: impl Into<String>) -> Self {
        Self {
            enterprise_id: enterprise_id.into(),
            requirement_id: requirement_id.into(),
        }
    }

    fn resolve<'a>(&'a self, value: &ParamValue) -> &'a str {
        match value {
            ParamValue::Literal(literal) => *literal,
            ParamValue::EnterpriseId => &self.enterprise_id,
            ParamValue::RequirementId => &self.requirement_id,
        }
    }
}

/// One partner "table" this client knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Stable identifier used in logs.
    pub key: &'static str,
    /// Human-readable form name, persisted as `queryName`.
    pub display_name: &'static str,
    /// Form identifier sent as `form_head_uuid`.
    pub form_id: &'static str,
    /// Declared parameters, in query-string order.
    pub params: &'static [(&'static str, ParamValue)],
}

impl QueryDescriptor {
    /// Resolves the declared parameters against the run's ids.
    ///
    /// `form_head_uuid` is appended last.
    #[must_use]
    pub fn query_pairs(&self, targets: &TargetIds) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| ((*key).to_string(), targets.resolve(value).to_string()))
            .chain(std::iter::once((
                "form_head_uuid".to_string(),
                self.form_id.to_string(),
            )))
            .collect()
    }
}

/// Requirement intake form (需求填写单).
pub const REQUIREMENT_FORM: QueryDescriptor = QueryDescriptor {
    key: "requirement_form",
    display_name: "需求填写单",
    form_id: "000e2589e57046b8a60a7490e4bb8972",
    params: &[
        ("page", ParamValue::Literal("1")),
        ("limit", ParamValue::Literal("50")),
        ("lsccgxajrqsfnhbp", ParamValue::EnterpriseId),
        ("jagzssffplsjmxxo", ParamValue::RequirementId),
    ],
};

/// Company master data form (企业基本信息).
pub const COMPANY_INFO: QueryDescriptor = QueryDescriptor {
    key: "company_info",
    display_name: "企业基本信息",
    form_id: "e1d617c9225f4dd4a2a175ef3b602723",
    params: &[
        ("page", ParamValue::Literal("1")),
        ("limit", ParamValue::Literal("50")),
        ("xgibbuhktvvnrxyv", ParamValue::EnterpriseId),
    ],
};

/// All queries, in the order their results are persisted.
pub const QUERY_DESCRIPTORS: [QueryDescriptor; 2] = [REQUIREMENT_FORM, COMPANY_INFO];

/// Record fields that point at a child table.
pub const CHILD_TABLE_FIELDS: [&str; 4] = [
    // 治理绩效
    "ncyikfjkhzawtzml",
    // 近三年能源情况
    "qkipecupqyvbthod",
    // 社会绩效
    "rqzeieqknlsorojn",
    // 基础财务数据
    "tlrtvxwmhaoojebz",
];

/// Suffix appended to a child-table field key to store its expanded rows.
pub const CHILD_DETAIL_SUFFIX: &str = "_detail";

/// Returns the synthetic key child rows for `field_key` are stored under.
#[must_use]
pub fn child_detail_key(field_key: &str) -> String {
    format!("{field_key}{CHILD_DETAIL_SUFFIX}")
}
