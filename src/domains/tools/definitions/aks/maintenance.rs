//! Maintenance window tools.
//!
//! Creates, lists and deletes named maintenance configurations. Weekly
//! schedules require a day of week, absolute-monthly schedules a day of
//! month; both rules are enforced before the CLI is invoked.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};
use crate::domains::tools::format::{field_text, parse_json, value_text};

use super::super::common::{text_route, tool_model};
use super::az;

// ============================================================================
// create_aks_maintenance_config
// ============================================================================

fn default_duration_hours() -> i64 {
    4
}

/// Parameters for creating a maintenance configuration.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MaintenanceCreateParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name for the maintenance configuration.
    pub config_name: String,

    /// Schedule type (Weekly, AbsoluteMonthly, or RelativeMonthly).
    pub schedule_type: String,

    /// Day of week for Weekly schedule (Monday-Sunday).
    #[serde(default)]
    pub day_of_week: Option<String>,

    /// Day of month for AbsoluteMonthly schedule (1-28).
    #[serde(default)]
    pub day_of_month: Option<i64>,

    /// Hour when maintenance should start (0-23).
    #[serde(default)]
    pub start_hour: Option<i64>,

    /// Maximum duration in hours (default: 4).
    #[serde(default = "default_duration_hours")]
    pub duration_hours: i64,
}

/// Creates a maintenance configuration on a cluster.
pub struct MaintenanceCreateTool;

impl MaintenanceCreateTool {
    pub const NAME: &'static str = "create_aks_maintenance_config";
    pub const DESCRIPTION: &'static str = "Create a maintenance configuration for an AKS \
        cluster. Weekly schedules require day_of_week; AbsoluteMonthly schedules require \
        day_of_month.";

    /// Build the create command, enforcing the schedule-type-dependent day
    /// field before any process is spawned.
    pub fn build_command(
        params: &MaintenanceCreateParams,
        config: &Config,
    ) -> Result<CommandSpec, ToolError> {
        let day_flag = match params.schedule_type.to_lowercase().as_str() {
            "weekly" => {
                let Some(day) = params.day_of_week.as_deref() else {
                    return Err(ToolError::validation(
                        "day_of_week is required for a Weekly schedule",
                    ));
                };
                Some(("--day-of-week", day.to_string()))
            }
            "absolutemonthly" => {
                let Some(day) = params.day_of_month else {
                    return Err(ToolError::validation(
                        "day_of_month is required for an AbsoluteMonthly schedule",
                    ));
                };
                Some(("--day-of-month", day.to_string()))
            }
            _ => None,
        };

        let mut spec = az(config)
            .args(["aks", "maintenanceconfiguration", "create"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.config_name)
            .flag("--schedule-type", &params.schedule_type)
            .context("creating maintenance configuration");

        if let Some((flag, day)) = day_flag {
            spec = spec.flag(flag, day);
        }
        spec = spec.flag_opt("--start-hour", params.start_hour);
        Ok(spec.flag("--duration-hours", params.duration_hours))
    }

    pub async fn execute(
        params: &MaintenanceCreateParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config)?;
        exec::run(&spec).await?;
        Ok(format!(
            "Maintenance configuration '{}' created for cluster '{}'.",
            params.config_name, params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<MaintenanceCreateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: MaintenanceCreateParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// list_aks_maintenance_configs
// ============================================================================

/// Parameters identifying the cluster whose configurations are listed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MaintenanceListParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,
}

/// Lists maintenance configurations on a cluster.
pub struct MaintenanceListTool;

impl MaintenanceListTool {
    pub const NAME: &'static str = "list_aks_maintenance_configs";
    pub const DESCRIPTION: &'static str = "List maintenance configurations for an AKS cluster.";

    pub fn build_command(params: &MaintenanceListParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "maintenanceconfiguration", "list"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .context("listing maintenance configurations")
    }

    pub async fn execute(
        params: &MaintenanceListParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let configs = parse_json(&stdout, "maintenance configurations")?;
        let records = configs.as_array().map(Vec::as_slice).unwrap_or_default();
        Ok(Self::format_configs(&params.cluster_name, records))
    }

    fn format_configs(cluster_name: &str, configs: &[Value]) -> String {
        if configs.is_empty() {
            return format!(
                "No maintenance configurations found for AKS cluster '{cluster_name}'."
            );
        }

        let mut lines = vec![format!(
            "Maintenance configurations for cluster '{cluster_name}':"
        )];

        for config in configs {
            lines.push(format!("Name: {}", field_text(config, "name")));

            let schedule = config
                .pointer("/properties/maintenanceWindow/schedule")
                .cloned()
                .unwrap_or_default();

            lines.push(format!(
                "  Schedule Type: {}",
                field_text(&schedule, "scheduleType")
            ));

            if let Some(day) = schedule.get("dayOfWeek").filter(|v| !v.is_null()) {
                lines.push(format!("  Day of Week: {}", value_text(day)));
            }
            if let Some(day) = schedule.get("dayOfMonth").filter(|v| !v.is_null()) {
                lines.push(format!("  Day of Month: {}", value_text(day)));
            }

            let start_hour = schedule
                .get("startHour")
                .filter(|v| !v.is_null())
                .map(value_text)
                .unwrap_or_else(|| "Not set".to_string());
            lines.push(format!("  Start Hour (UTC): {start_hour}"));

            let duration = schedule
                .get("durationHours")
                .filter(|v| !v.is_null())
                .map(value_text)
                .unwrap_or_else(|| "Not set".to_string());
            lines.push(format!("  Duration (hours): {duration}"));

            lines.push("---".to_string());
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        tool_model::<MaintenanceListParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: MaintenanceListParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// delete_aks_maintenance_config
// ============================================================================

/// Parameters for deleting a maintenance configuration.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MaintenanceDeleteParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the maintenance configuration to delete.
    pub config_name: String,
}

/// Deletes a maintenance configuration without interactive confirmation.
pub struct MaintenanceDeleteTool;

impl MaintenanceDeleteTool {
    pub const NAME: &'static str = "delete_aks_maintenance_config";
    pub const DESCRIPTION: &'static str =
        "Delete a maintenance configuration for an AKS cluster.";

    pub fn build_command(params: &MaintenanceDeleteParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "maintenanceconfiguration", "delete"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.config_name)
            .switch("--yes")
            .context("deleting maintenance configuration")
    }

    pub async fn execute(
        params: &MaintenanceDeleteParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Maintenance configuration '{}' deleted.",
            params.config_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<MaintenanceDeleteParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: MaintenanceDeleteParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_params(schedule_type: &str) -> MaintenanceCreateParams {
        serde_json::from_value(json!({
            "resource_group_name": "rg1",
            "cluster_name": "aks1",
            "config_name": "default",
            "schedule_type": schedule_type
        }))
        .unwrap()
    }

    #[test]
    fn test_create_weekly_requires_day_of_week() {
        let params = create_params("Weekly");
        let err = MaintenanceCreateTool::build_command(&params, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("day_of_week"));
    }

    #[test]
    fn test_create_absolute_monthly_requires_day_of_month() {
        let params = create_params("AbsoluteMonthly");
        let err = MaintenanceCreateTool::build_command(&params, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("day_of_month"));
    }

    #[test]
    fn test_create_weekly_tokens() {
        let mut params = create_params("Weekly");
        params.day_of_week = Some("Monday".to_string());
        params.start_hour = Some(2);
        let spec = MaintenanceCreateTool::build_command(&params, &Config::default()).unwrap();
        assert_eq!(
            spec.tokens(),
            vec![
                "az",
                "aks",
                "maintenanceconfiguration",
                "create",
                "--resource-group",
                "rg1",
                "--cluster-name",
                "aks1",
                "--name",
                "default",
                "--schedule-type",
                "Weekly",
                "--day-of-week",
                "Monday",
                "--start-hour",
                "2",
                "--duration-hours",
                "4",
            ]
        );
    }

    #[test]
    fn test_create_without_start_hour_omits_flag() {
        let mut params = create_params("AbsoluteMonthly");
        params.day_of_month = Some(15);
        let tokens = MaintenanceCreateTool::build_command(&params, &Config::default())
            .unwrap()
            .tokens();
        assert!(!tokens.contains(&"--start-hour".to_string()));
        assert!(tokens.ends_with(&["--duration-hours".to_string(), "4".to_string()]));
    }

    #[test]
    fn test_format_configs_empty() {
        assert_eq!(
            MaintenanceListTool::format_configs("aks1", &[]),
            "No maintenance configurations found for AKS cluster 'aks1'."
        );
    }

    #[test]
    fn test_format_configs_weekly_block() {
        let configs = vec![json!({
            "name": "default",
            "properties": {
                "maintenanceWindow": {
                    "schedule": {
                        "scheduleType": "Weekly",
                        "dayOfWeek": "Monday",
                        "startHour": 2,
                        "durationHours": 4
                    }
                }
            }
        })];
        let text = MaintenanceListTool::format_configs("aks1", &configs);
        let expected = [
            "Maintenance configurations for cluster 'aks1':",
            "Name: default",
            "  Schedule Type: Weekly",
            "  Day of Week: Monday",
            "  Start Hour (UTC): 2",
            "  Duration (hours): 4",
            "---",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_configs_missing_schedule_fields_say_not_set() {
        let configs = vec![json!({"name": "sparse"})];
        let text = MaintenanceListTool::format_configs("aks1", &configs);
        assert!(text.contains("Start Hour (UTC): Not set"));
        assert!(text.contains("Duration (hours): Not set"));
        assert!(!text.contains("Day of Week"));
        assert!(!text.contains("Day of Month"));
    }

    #[test]
    fn test_delete_includes_yes() {
        let params = MaintenanceDeleteParams {
            resource_group_name: "rg1".to_string(),
            cluster_name: "aks1".to_string(),
            config_name: "default".to_string(),
        };
        let tokens = MaintenanceDeleteTool::build_command(&params, &Config::default()).tokens();
        assert!(tokens.contains(&"--yes".to_string()));
    }
}
