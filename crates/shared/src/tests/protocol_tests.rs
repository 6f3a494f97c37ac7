use super::*;

#[test]
fn upscale_response_discriminates_completion_from_rejection() {
    let completed: UpscaleResponse = serde_json::from_str(
        r#"{
            "success": true,
            "output_file": "upscaled_4x_photo.png",
            "message": "Image upscaled successfully",
            "original_size": "512x512",
            "upscaled_size": "2048x2048"
        }"#,
    )
    .expect("completion body");
    match completed {
        UpscaleResponse::Completed(body) => {
            assert!(body.success);
            assert_eq!(body.output_file, "upscaled_4x_photo.png");
        }
        other => panic!("unexpected variant: {other:?}"),
    }

    let rejected: UpscaleResponse =
        serde_json::from_str(r#"{"error": "model unavailable"}"#).expect("rejection body");
    match rejected {
        UpscaleResponse::Rejected(body) => assert_eq!(body.error, "model unavailable"),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn download_path_is_derived_from_artifact_id() {
    let artifact = crate::domain::ArtifactId("x.png".to_string());
    assert_eq!(download_path(&artifact), "download/x.png");
}
