use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep them boxed so `Result<T>` stays small
impl From<gix::object::commit::Error> for SheetError {
    fn from(err: gix::object::commit::Error) -> Self {
        SheetError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for SheetError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        SheetError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for SheetError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        SheetError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for SheetError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        SheetError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for SheetError {
    fn from(err: gix::objs::decode::Error) -> Self {
        SheetError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::discover::Error> for SheetError {
    fn from(err: gix::discover::Error) -> Self {
        SheetError::GitDiscover(Box::new(err))
    }
}
