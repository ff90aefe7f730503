mod descriptor;
mod registry;

pub use descriptor::DescriptorError;
pub use registry::RegistryError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MavenBuild;

    fn register(build: &mut MavenBuild, group_id: &str, artifact_id: &str) -> Result<()> {
        build.plugin(group_id, artifact_id)?;
        Ok(())
    }

    #[test]
    fn test_registry_error_converts() {
        let mut build = MavenBuild::new();
        let err = register(&mut build, "com.example", "").unwrap_err();
        assert!(matches!(err, Error::Registry(RegistryError::InvalidKey { .. })));
        assert_eq!(err.to_string(), "invalid artifact id '': must not be empty");
    }
}
