//! engine::publish
//!
//! Push a rendered changelog to the forge as release notes.
//!
//! Publishing runs after the local file is written. A failure here is
//! reported to the caller, who logs it; the local file is left in place.

use crate::forge::{Forge, ForgeError};

/// Replace the notes of the release tagged `tag` with `content`.
pub async fn publish(forge: &dyn Forge, tag: &str, content: &str) -> Result<(), ForgeError> {
    log::info!("Update GITHUB release notes for {}", tag);
    let release = forge.update_release_notes(tag, content).await?;
    log::info!("Release notes published: {}", release.url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::{FailOn, MockForge, MockOperation};

    #[tokio::test]
    async fn updates_release_body() {
        let forge = MockForge::new().with_release("v1.1.0", "2023-02-01T00:00:00Z");
        publish(&forge, "v1.1.0", "notes").await.unwrap();

        assert_eq!(
            forge.operations(),
            vec![MockOperation::UpdateReleaseNotes {
                tag: "v1.1.0".into(),
                body: "notes".into()
            }]
        );
        assert_eq!(
            forge.release_sync("v1.1.0").unwrap().body.as_deref(),
            Some("notes")
        );
    }

    #[tokio::test]
    async fn propagates_forge_error() {
        let forge = MockForge::new()
            .with_release("v1.1.0", "2023-02-01T00:00:00Z")
            .fail_on(FailOn::UpdateReleaseNotes(ForgeError::AuthRequired));

        let result = publish(&forge, "v1.1.0", "notes").await;
        assert!(matches!(result, Err(ForgeError::AuthRequired)));
    }
}
