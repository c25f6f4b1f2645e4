#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("out of memory while growing {what}")]
    OutOfMemory { what: &'static str },
}

impl BlobError {
    pub(crate) fn oom(what: &'static str) -> Self {
        Self::OutOfMemory { what }
    }
}

impl From<vm_core::Error> for BlobError {
    fn from(err: vm_core::Error) -> Self {
        match err {
            vm_core::Error::OutOfMemory { .. } => Self::oom("label grid"),
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BlobError;

    #[test]
    fn core_errors_map_to_blob_kinds() {
        let oom: BlobError = vm_core::Error::OutOfMemory { elements: 12 }.into();
        assert_eq!(oom, BlobError::OutOfMemory { what: "label grid" });

        let bad: BlobError = vm_core::Error::SizeMismatch {
            expected: 6,
            actual: 5,
        }
        .into();
        assert_eq!(
            bad,
            BlobError::InvalidArgument("size mismatch: expected 6, got 5".to_string())
        );
    }
}
