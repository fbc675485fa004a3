use super::{
    schema::{field, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `filesystems` monitor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilesystemsConfig {
    pub common: MonitorConfig,
    /// Root of the host filesystem when running in a container.
    pub host_fs_path: String,
    pub fs_types: Vec<String>,
    pub mount_points: Vec<String>,
    pub include_logical: bool,
    pub send_mode_dimension: bool,
}

impl MonitorSchema for FilesystemsConfig {
    const SCHEMA_NAME: &'static str = "filesystems.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("hostFSPath" => host_fs_path),
            field!("fsTypes" => fs_types),
            field!("mountPoints" => mount_points),
            field!("includeLogical" => include_logical),
            field!("sendModeDimension" => send_mode_dimension),
        ]
    }
}
