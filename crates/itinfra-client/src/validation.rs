//! Parameter validation run before any request leaves the client.
//!
//! Every check is pure: it either returns `Ok` or an
//! [`ClientError::InvalidParameter`] naming the parameter and the calling
//! operation. Search strings are passed through as opaque regular
//! expressions; only blankness is checked.

use crate::error::{ClientError, Result};

/// Parameter names used in validation failures.
pub mod names {
    pub const USER_ID: &str = "userId";
    pub const QUALIFIED_NAME: &str = "qualifiedName";
    pub const SEARCH_STRING: &str = "searchString";
    pub const NAME: &str = "name";
    pub const START_FROM: &str = "startFrom";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const TEMPLATE_GUID: &str = "templateGUID";
    pub const CLASSIFICATION_NAME: &str = "classificationName";
    pub const RELATIONSHIP_TYPE_NAME: &str = "relationshipTypeName";
    pub const CALLER_ID: &str = "callerId";
    pub const NETWORK_ADDRESS: &str = "networkAddress";
    pub const CONTACT_METHOD_VALUE: &str = "contactMethodValue";
    pub const PROFILE_USER_ID: &str = "profileUserId";
}

/// Validates caller-supplied parameters against the client's page-size ceiling.
#[derive(Debug, Clone, Copy)]
pub struct ParameterValidator {
    max_page_size: i32,
}

impl ParameterValidator {
    /// Create a validator. A `max_page_size` of 0 disables the ceiling.
    pub fn new(max_page_size: i32) -> Self {
        Self { max_page_size }
    }

    pub fn max_page_size(&self) -> i32 {
        self.max_page_size
    }

    /// The calling user id must be present.
    pub fn validate_user_id(&self, user_id: &str, operation: &str) -> Result<()> {
        require_non_blank(user_id, names::USER_ID, operation)
    }

    /// A unique identifier must be present.
    pub fn validate_guid(&self, guid: &str, parameter: &str, operation: &str) -> Result<()> {
        require_non_blank(guid, parameter, operation)
    }

    /// A name used for exact-match lookup must be present.
    pub fn validate_name(&self, name: &str, parameter: &str, operation: &str) -> Result<()> {
        require_non_blank(name, parameter, operation)
    }

    /// Qualified names are mandatory on create and full-replace update.
    pub fn validate_qualified_name(
        &self,
        qualified_name: Option<&str>,
        operation: &str,
    ) -> Result<()> {
        require_non_blank(
            qualified_name.unwrap_or_default(),
            names::QUALIFIED_NAME,
            operation,
        )
    }

    /// Check the qualified name unless the update merges with stored values.
    pub fn validate_update_qualified_name(
        &self,
        qualified_name: Option<&str>,
        is_merge_update: bool,
        operation: &str,
    ) -> Result<()> {
        if is_merge_update {
            return Ok(());
        }
        self.validate_qualified_name(qualified_name, operation)
    }

    /// A search string must be present; its regex syntax is the server's concern.
    pub fn validate_search_string(&self, search_string: &str, operation: &str) -> Result<()> {
        require_non_blank(search_string, names::SEARCH_STRING, operation)
    }

    /// Validate a paging request and return the page size to send.
    ///
    /// A `page_size` of 0 asks for the configured maximum.
    pub fn validate_paging(&self, start_from: i32, page_size: i32, operation: &str) -> Result<i32> {
        if start_from < 0 {
            return Err(ClientError::invalid_parameter(
                operation,
                names::START_FROM,
                format!("startFrom ({}) cannot be negative", start_from),
            ));
        }

        if page_size < 0 {
            return Err(ClientError::invalid_parameter(
                operation,
                names::PAGE_SIZE,
                format!("pageSize ({}) cannot be negative", page_size),
            ));
        }

        if self.max_page_size > 0 && page_size > self.max_page_size {
            return Err(ClientError::invalid_parameter(
                operation,
                names::PAGE_SIZE,
                format!(
                    "pageSize ({}) exceeds the maximum page size ({})",
                    page_size, self.max_page_size
                ),
            ));
        }

        if page_size == 0 {
            Ok(self.max_page_size)
        } else {
            Ok(page_size)
        }
    }
}

fn require_non_blank(value: &str, parameter: &str, operation: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::invalid_parameter(
            operation,
            parameter,
            format!("{} cannot be null or blank", parameter),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ParameterValidator {
        ParameterValidator::new(100)
    }

    #[test]
    fn test_blank_user_id_rejected() {
        let err = validator().validate_user_id("", "createAsset").unwrap_err();
        assert_eq!(err.parameter(), Some(names::USER_ID));
        assert_eq!(err.operation(), Some("createAsset"));

        assert!(validator().validate_user_id("   ", "createAsset").is_err());
        assert!(validator().validate_user_id("garygeeke", "createAsset").is_ok());
    }

    #[test]
    fn test_blank_guid_rejected() {
        let err = validator()
            .validate_guid("", "assetGUID", "removeAsset")
            .unwrap_err();
        assert_eq!(err.parameter(), Some("assetGUID"));
        assert!(validator()
            .validate_guid("8f6a-11", "assetGUID", "removeAsset")
            .is_ok());
    }

    #[test]
    fn test_qualified_name_required() {
        assert!(validator()
            .validate_qualified_name(None, "createAsset")
            .is_err());
        assert!(validator()
            .validate_qualified_name(Some(""), "createAsset")
            .is_err());
        assert!(validator()
            .validate_qualified_name(Some("asset1"), "createAsset")
            .is_ok());
    }

    #[test]
    fn test_merge_update_skips_qualified_name() {
        assert!(validator()
            .validate_update_qualified_name(None, true, "updateAsset")
            .is_ok());
        let err = validator()
            .validate_update_qualified_name(Some(" "), false, "updateAsset")
            .unwrap_err();
        assert_eq!(err.parameter(), Some(names::QUALIFIED_NAME));
    }

    #[test]
    fn test_search_string_is_opaque() {
        assert!(validator().validate_search_string("", "findAssets").is_err());
        // Not a valid regex, but syntax is left to the server.
        assert!(validator().validate_search_string("[(", "findAssets").is_ok());
    }

    #[test]
    fn test_paging_negative_start() {
        let err = validator().validate_paging(-1, 10, "findAssets").unwrap_err();
        assert_eq!(err.parameter(), Some(names::START_FROM));
    }

    #[test]
    fn test_paging_negative_page_size() {
        let err = validator().validate_paging(0, -5, "findAssets").unwrap_err();
        assert_eq!(err.parameter(), Some(names::PAGE_SIZE));
    }

    #[test]
    fn test_paging_above_maximum() {
        let err = validator().validate_paging(0, 101, "findAssets").unwrap_err();
        assert_eq!(err.parameter(), Some(names::PAGE_SIZE));
        assert_eq!(validator().validate_paging(0, 100, "findAssets").unwrap(), 100);
    }

    #[test]
    fn test_paging_zero_uses_default() {
        assert_eq!(validator().validate_paging(0, 0, "findAssets").unwrap(), 100);
        assert_eq!(validator().validate_paging(20, 10, "findAssets").unwrap(), 10);
    }

    #[test]
    fn test_paging_unbounded() {
        let unbounded = ParameterValidator::new(0);
        assert_eq!(unbounded.validate_paging(0, 5000, "findAssets").unwrap(), 5000);
        assert_eq!(unbounded.validate_paging(0, 0, "findAssets").unwrap(), 0);
    }
}
