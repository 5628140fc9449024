//! IT profiles, their contact methods and the user identities they run as.
//!
//! An IT profile describes a non-human actor (a server, an engine, a batch
//! job). Profiles link to the user identities the actor authenticates with
//! and to the assets the profile describes.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{
    ElementOperations, CONTACT_METHOD, IT_INFRASTRUCTURE_PROFILE, IT_PROFILE, PROFILE_IDENTITY,
    USER_IDENTITY,
};
use crate::rest::RestCall;
use crate::types::elements::{ItProfileElement, UserIdentityElement};
use crate::types::properties::{
    ContactMethodProperties, ItProfileProperties, UserIdentityProperties,
};
use crate::types::requests::{EffectiveDates, ElementRequestBody, ExternalSource};
use crate::validation::names;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ItProfileManagerClient {
    base: ItInfrastructureClient,
}

impl ItProfileManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn profiles(&self) -> ElementOperations<'_> {
        self.base.elements(&IT_PROFILE)
    }

    fn identities(&self) -> ElementOperations<'_> {
        self.base.elements(&USER_IDENTITY)
    }

    /// Create an IT profile and return its GUID.
    pub async fn create_it_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &ItProfileProperties,
    ) -> Result<String> {
        self.profiles()
            .create("createITProfile", user_id, source, is_home, properties)
            .await
    }

    pub async fn update_it_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        it_profile_guid: &str,
        is_merge_update: bool,
        properties: &ItProfileProperties,
    ) -> Result<()> {
        self.profiles()
            .update(
                "updateITProfile",
                user_id,
                source,
                it_profile_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn delete_it_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        it_profile_guid: &str,
    ) -> Result<()> {
        self.profiles()
            .remove("deleteITProfile", user_id, source, it_profile_guid)
            .await
    }

    /// Add a contact method to a profile and return the contact method's GUID.
    pub async fn add_contact_method(
        &self,
        user_id: &str,
        source: &ExternalSource,
        it_profile_guid: &str,
        properties: &ContactMethodProperties,
    ) -> Result<String> {
        const OPERATION: &str = "addContactMethod";
        let validator = self.base.validator();

        validator.validate_user_id(user_id, OPERATION)?;
        validator.validate_guid(it_profile_guid, IT_PROFILE.guid_parameter, OPERATION)?;
        validator.validate_name(
            &properties.contact_method_value,
            names::CONTACT_METHOD_VALUE,
            OPERATION,
        )?;

        let body = ElementRequestBody::new(source, properties);
        let call = RestCall::post(OPERATION, user_id, IT_PROFILE.template("/{2}/contact-methods"))
            .arg(it_profile_guid);
        self.base.caller().call_guid(call, Some(&body)).await
    }

    pub async fn delete_contact_method(
        &self,
        user_id: &str,
        source: &ExternalSource,
        contact_method_guid: &str,
    ) -> Result<()> {
        self.base
            .elements(&CONTACT_METHOD)
            .remove("deleteContactMethod", user_id, source, contact_method_guid)
            .await
    }

    /// Record that the profile describes the actor behind an asset.
    pub async fn link_asset_to_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        it_profile_guid: &str,
        asset_guid: &str,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.profiles()
            .relate(
                "linkAssetToProfile",
                user_id,
                source,
                is_home,
                &IT_INFRASTRUCTURE_PROFILE,
                it_profile_guid,
                asset_guid,
                Option::<&()>::None,
                validity,
            )
            .await
    }

    pub async fn unlink_asset_from_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        it_profile_guid: &str,
        asset_guid: &str,
    ) -> Result<()> {
        self.profiles()
            .unrelate(
                "unlinkAssetFromProfile",
                user_id,
                source,
                &IT_INFRASTRUCTURE_PROFILE,
                it_profile_guid,
                asset_guid,
            )
            .await
    }

    pub async fn get_it_profile_by_guid(
        &self,
        user_id: &str,
        it_profile_guid: &str,
    ) -> Result<ItProfileElement> {
        self.profiles()
            .get_by_guid("getITProfileByGUID", user_id, it_profile_guid)
            .await
    }

    /// The profile linked to the user identity with this user id.
    pub async fn get_it_profile_by_user_id(
        &self,
        user_id: &str,
        profile_user_id: &str,
    ) -> Result<ItProfileElement> {
        const OPERATION: &str = "getITProfileByUserId";
        let validator = self.base.validator();

        validator.validate_user_id(user_id, OPERATION)?;
        validator.validate_name(profile_user_id, names::PROFILE_USER_ID, OPERATION)?;

        let call = RestCall::get(OPERATION, user_id, IT_PROFILE.template("/user-ids/{2}"))
            .arg(profile_user_id);
        self.base
            .caller()
            .call_element(call, Option::<&()>::None)
            .await
    }

    pub async fn get_it_profiles_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ItProfileElement>> {
        self.profiles()
            .get_by_name(
                "getITProfilesByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn find_it_profiles(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ItProfileElement>> {
        self.profiles()
            .find(
                "findITProfiles",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn create_user_identity(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &UserIdentityProperties,
    ) -> Result<String> {
        self.identities()
            .create("createUserIdentity", user_id, source, is_home, properties)
            .await
    }

    pub async fn update_user_identity(
        &self,
        user_id: &str,
        source: &ExternalSource,
        user_identity_guid: &str,
        is_merge_update: bool,
        properties: &UserIdentityProperties,
    ) -> Result<()> {
        self.identities()
            .update(
                "updateUserIdentity",
                user_id,
                source,
                user_identity_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn delete_user_identity(
        &self,
        user_id: &str,
        source: &ExternalSource,
        user_identity_guid: &str,
    ) -> Result<()> {
        self.identities()
            .remove("deleteUserIdentity", user_id, source, user_identity_guid)
            .await
    }

    pub async fn add_identity_to_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        it_profile_guid: &str,
        user_identity_guid: &str,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.profiles()
            .relate(
                "addIdentityToProfile",
                user_id,
                source,
                is_home,
                &PROFILE_IDENTITY,
                it_profile_guid,
                user_identity_guid,
                Option::<&()>::None,
                validity,
            )
            .await
    }

    pub async fn remove_identity_from_profile(
        &self,
        user_id: &str,
        source: &ExternalSource,
        it_profile_guid: &str,
        user_identity_guid: &str,
    ) -> Result<()> {
        self.profiles()
            .unrelate(
                "removeIdentityFromProfile",
                user_id,
                source,
                &PROFILE_IDENTITY,
                it_profile_guid,
                user_identity_guid,
            )
            .await
    }

    pub async fn find_user_identities(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<UserIdentityElement>> {
        self.identities()
            .find(
                "findUserIdentities",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_user_identities_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<UserIdentityElement>> {
        self.identities()
            .get_by_name(
                "getUserIdentitiesByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_user_identity_by_guid(
        &self,
        user_id: &str,
        user_identity_guid: &str,
    ) -> Result<UserIdentityElement> {
        self.identities()
            .get_by_guid("getUserIdentityByGUID", user_id, user_identity_guid)
            .await
    }
}
