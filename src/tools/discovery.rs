use super::{Action, ToolSpec};

pub(super) const TOOLS: &[ToolSpec] = &[ToolSpec {
    name: "quicksight_overview",
    description: "Get overview statistics of QuickSight resources: how many datasets, data sources, analyses and dashboards the account holds",
    fields: &[],
    action: Action::Overview(&[
        ("datasets_count", "list_datasets"),
        ("datasources_count", "list_datasources"),
        ("analyses_count", "list_analyses"),
        ("dashboards_count", "list_dashboards"),
    ]),
}];
