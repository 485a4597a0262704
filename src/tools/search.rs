use super::doc::FILTERS;
use super::{Action, FieldSpec, FieldType, ToolSpec};

const FILTERS_FIELD: FieldSpec =
    FieldSpec::required("filters", "Filters", FieldType::Array, FILTERS);

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "search_analyses",
        description: "Search for analyses using filters, with pagination",
        fields: &[FILTERS_FIELD],
        action: Action::List {
            operation: "SearchAnalyses",
            source: "AnalysisSummaryList",
            key: "analyses",
            echo: &[],
            project: None,
        },
    },
    ToolSpec {
        name: "search_dashboards",
        description: "Search for dashboards using filters, with pagination",
        fields: &[FILTERS_FIELD],
        action: Action::List {
            operation: "SearchDashboards",
            source: "DashboardSummaryList",
            key: "dashboards",
            echo: &[],
            project: None,
        },
    },
    ToolSpec {
        name: "search_data_sets",
        description: "Search for datasets using filters, with pagination",
        fields: &[FILTERS_FIELD],
        action: Action::List {
            operation: "SearchDataSets",
            source: "DataSetSummaries",
            key: "datasets",
            echo: &[],
            project: None,
        },
    },
    ToolSpec {
        name: "search_data_sources",
        description: "Search for data sources using filters, with pagination",
        fields: &[FILTERS_FIELD],
        action: Action::List {
            operation: "SearchDataSources",
            source: "DataSourceSummaries",
            key: "datasources",
            echo: &[],
            project: None,
        },
    },
];
