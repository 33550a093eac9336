use crate::error::ValidationError;

/// Largest accepted upload, 10 MiB.
pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    RejectedNotImage,
    RejectedTooLarge,
}

/// Classifies a candidate upload. The media type is checked before the size.
pub fn validate_file(media_type: &str, size: u64) -> Validation {
    if !media_type.starts_with("image/") {
        return Validation::RejectedNotImage;
    }
    if size > MAX_IMAGE_SIZE {
        return Validation::RejectedTooLarge;
    }
    Validation::Accepted
}

pub fn check_file(media_type: &str, size: u64) -> Result<(), ValidationError> {
    match validate_file(media_type, size) {
        Validation::Accepted => Ok(()),
        Validation::RejectedNotImage => Err(ValidationError::NotAnImage {
            media_type: media_type.to_string(),
        }),
        Validation::RejectedTooLarge => Err(ValidationError::TooLarge {
            size,
            limit: MAX_IMAGE_SIZE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_up_to_the_limit() {
        assert_eq!(validate_file("image/jpeg", 2 * 1024 * 1024), Validation::Accepted);
        assert_eq!(validate_file("image/png", 0), Validation::Accepted);
        assert_eq!(validate_file("image/webp", MAX_IMAGE_SIZE), Validation::Accepted);
    }

    #[test]
    fn rejects_one_byte_over_the_limit() {
        assert_eq!(validate_file("image/jpeg", 10_485_761), Validation::RejectedTooLarge);
    }

    #[test]
    fn media_type_is_checked_before_size() {
        assert_eq!(validate_file("application/pdf", 10), Validation::RejectedNotImage);
        assert_eq!(validate_file("text/plain", u64::MAX), Validation::RejectedNotImage);
        assert_eq!(validate_file("", 0), Validation::RejectedNotImage);
    }

    #[test]
    fn prefix_match_is_exact() {
        assert_eq!(validate_file("Image/png", 10), Validation::RejectedNotImage);
        assert_eq!(validate_file("video/image", 10), Validation::RejectedNotImage);
        assert_eq!(validate_file("image/", 10), Validation::Accepted);
    }

    #[test]
    fn check_file_reports_the_reason() {
        assert!(check_file("image/gif", 1).is_ok());
        assert_eq!(
            check_file("image/gif", MAX_IMAGE_SIZE + 1),
            Err(ValidationError::TooLarge {
                size: MAX_IMAGE_SIZE + 1,
                limit: MAX_IMAGE_SIZE
            })
        );
        assert!(matches!(
            check_file("audio/mp3", 1),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn every_input_maps_to_one_outcome() {
        let types = ["image/jpeg", "image/", "application/json", "", "IMAGE/PNG"];
        let sizes = [0, 1, MAX_IMAGE_SIZE - 1, MAX_IMAGE_SIZE, MAX_IMAGE_SIZE + 1, u64::MAX];
        for media_type in types {
            for size in sizes {
                let expected = if !media_type.starts_with("image/") {
                    Validation::RejectedNotImage
                } else if size > 10_485_760 {
                    Validation::RejectedTooLarge
                } else {
                    Validation::Accepted
                };
                assert_eq!(validate_file(media_type, size), expected, "{media_type} {size}");
            }
        }
    }
}
