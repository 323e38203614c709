use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingError {
    #[error("value rejected by filter of setting '{setting}'")]
    Rejected { setting: String },
}
