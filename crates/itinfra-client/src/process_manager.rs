//! Processes, their hierarchy, and the lineage relationships between them.
//!
//! Lineage is captured with four relationship kinds:
//! - data flow: data passes from a supplier to a consumer
//! - control flow: control passes from the current step to the next one
//! - process call: one process invokes another
//! - lineage mapping: a fine-grained source to destination mapping
//!
//! Each can be set up, read back, updated and cleared, and walked in either
//! direction from one of its ends.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{
    ElementOperations, LineageOperations, CONTROL_FLOW, DATA_FLOW, LINEAGE_MAPPING, PROCESS,
    PROCESS_CALL, PROCESS_HIERARCHY,
};
use crate::rest::RestCall;
use crate::types::elements::{
    ControlFlowElement, DataFlowElement, LineageMappingElement, ProcessCallElement,
    ProcessElement, RelatedElement,
};
use crate::types::properties::{
    ControlFlowProperties, DataFlowProperties, LineageMappingProperties, ProcessCallProperties,
    ProcessContainmentProperties, ProcessProperties, ProcessStatus, TemplateProperties,
};
use crate::types::requests::{
    EffectiveDates, EffectiveTimeQueryRequestBody, ExternalSource, ProcessStatusRequestBody,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ProcessManagerClient {
    base: ItInfrastructureClient,
}

impl ProcessManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn processes(&self) -> ElementOperations<'_> {
        self.base.elements(&PROCESS)
    }

    fn data_flows(&self) -> LineageOperations<'_> {
        self.base.lineage(&DATA_FLOW)
    }

    fn control_flows(&self) -> LineageOperations<'_> {
        self.base.lineage(&CONTROL_FLOW)
    }

    fn process_calls(&self) -> LineageOperations<'_> {
        self.base.lineage(&PROCESS_CALL)
    }

    fn lineage_mappings(&self) -> LineageOperations<'_> {
        self.base.lineage(&LINEAGE_MAPPING)
    }

    /// Create a process and return its GUID.
    ///
    /// Use [`update_process_status`](Self::update_process_status) to move it
    /// through its lifecycle afterwards.
    pub async fn create_process(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &ProcessProperties,
    ) -> Result<String> {
        self.processes()
            .create("createProcess", user_id, source, is_home, properties)
            .await
    }

    pub async fn create_process_from_template(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.processes()
            .create_from_template(
                "createProcessFromTemplate",
                user_id,
                source,
                is_home,
                template_guid,
                template_properties,
            )
            .await
    }

    pub async fn update_process(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_guid: &str,
        is_merge_update: bool,
        properties: &ProcessProperties,
    ) -> Result<()> {
        self.processes()
            .update(
                "updateProcess",
                user_id,
                source,
                process_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn update_process_status(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_guid: &str,
        process_status: ProcessStatus,
    ) -> Result<()> {
        const OPERATION: &str = "updateProcessStatus";
        let validator = self.base.validator();

        validator.validate_user_id(user_id, OPERATION)?;
        validator.validate_guid(process_guid, PROCESS.guid_parameter, OPERATION)?;

        let body = ProcessStatusRequestBody {
            external_source_guid: source.guid.clone(),
            external_source_name: source.name.clone(),
            process_status,
        };
        let call = RestCall::post(OPERATION, user_id, PROCESS.template("/{2}/status"))
            .arg(process_guid);
        self.base.caller().call_void(call, Some(&body)).await
    }

    pub async fn publish_process(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_guid: &str,
    ) -> Result<()> {
        self.processes()
            .publish("publishProcess", user_id, source, process_guid)
            .await
    }

    pub async fn withdraw_process(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_guid: &str,
    ) -> Result<()> {
        self.processes()
            .withdraw("withdrawProcess", user_id, source, process_guid)
            .await
    }

    pub async fn remove_process(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_guid: &str,
    ) -> Result<()> {
        self.processes()
            .remove("removeProcess", user_id, source, process_guid)
            .await
    }

    /// Make `child_process_guid` a sub-process of `parent_process_guid`.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_process_parent(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        parent_process_guid: &str,
        child_process_guid: &str,
        properties: &ProcessContainmentProperties,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.processes()
            .relate(
                "setupProcessParent",
                user_id,
                source,
                is_home,
                &PROCESS_HIERARCHY,
                parent_process_guid,
                child_process_guid,
                Some(properties),
                validity,
            )
            .await
    }

    pub async fn clear_process_parent(
        &self,
        user_id: &str,
        source: &ExternalSource,
        parent_process_guid: &str,
        child_process_guid: &str,
    ) -> Result<()> {
        self.processes()
            .unrelate(
                "clearProcessParent",
                user_id,
                source,
                &PROCESS_HIERARCHY,
                parent_process_guid,
                child_process_guid,
            )
            .await
    }

    /// The parent of a process, or `None` for a top-level process.
    pub async fn get_process_parent(
        &self,
        user_id: &str,
        process_guid: &str,
        effective_time: Option<DateTime<Utc>>,
    ) -> Result<Option<RelatedElement>> {
        const OPERATION: &str = "getProcessParent";
        let validator = self.base.validator();

        validator.validate_user_id(user_id, OPERATION)?;
        validator.validate_guid(process_guid, PROCESS.guid_parameter, OPERATION)?;

        let body = EffectiveTimeQueryRequestBody { effective_time };
        let call = RestCall::post(OPERATION, user_id, PROCESS.template("/{2}/parent/retrieve"))
            .arg(process_guid);
        self.base
            .caller()
            .call_optional_element(call, Some(&body))
            .await
    }

    pub async fn get_sub_processes(
        &self,
        user_id: &str,
        process_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelatedElement>> {
        const OPERATION: &str = "getSubProcesses";
        let validator = self.base.validator();

        validator.validate_user_id(user_id, OPERATION)?;
        validator.validate_guid(process_guid, PROCESS.guid_parameter, OPERATION)?;
        let page_size = validator.validate_paging(start_from, page_size, OPERATION)?;

        let body = EffectiveTimeQueryRequestBody { effective_time };
        let call = RestCall::post(
            OPERATION,
            user_id,
            PROCESS.template("/{2}/children/retrieve?startFrom={3}&pageSize={4}"),
        )
        .arg(process_guid)
        .arg(start_from)
        .arg(page_size);
        self.base.caller().call_elements(call, Some(&body)).await
    }

    pub async fn find_processes(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ProcessElement>> {
        self.processes()
            .find(
                "findProcesses",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_processes_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ProcessElement>> {
        self.processes()
            .get_by_name(
                "getProcessesByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_process_by_guid(
        &self,
        user_id: &str,
        process_guid: &str,
    ) -> Result<ProcessElement> {
        self.processes()
            .get_by_guid("getProcessByGUID", user_id, process_guid)
            .await
    }

    // Data flow

    /// Record that data flows from `data_supplier_guid` to `data_consumer_guid`.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_data_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        data_supplier_guid: &str,
        data_consumer_guid: &str,
        properties: Option<&DataFlowProperties>,
        validity: EffectiveDates,
    ) -> Result<String> {
        self.data_flows()
            .setup(
                "setupDataFlow",
                user_id,
                source,
                is_home,
                data_supplier_guid,
                data_consumer_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn get_data_flow(
        &self,
        user_id: &str,
        data_supplier_guid: &str,
        data_consumer_guid: &str,
        qualified_name: Option<&str>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Result<DataFlowElement> {
        self.data_flows()
            .get_between(
                "getDataFlow",
                user_id,
                data_supplier_guid,
                data_consumer_guid,
                qualified_name,
                effective_time,
            )
            .await
    }

    pub async fn update_data_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        data_flow_guid: &str,
        properties: Option<&DataFlowProperties>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.data_flows()
            .update(
                "updateDataFlow",
                user_id,
                source,
                data_flow_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn clear_data_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        data_flow_guid: &str,
    ) -> Result<()> {
        self.data_flows()
            .clear("clearDataFlow", user_id, source, data_flow_guid)
            .await
    }

    pub async fn get_data_flow_consumers(
        &self,
        user_id: &str,
        data_supplier_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<DataFlowElement>> {
        self.data_flows()
            .get_downstream(
                "getDataFlowConsumers",
                user_id,
                data_supplier_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_data_flow_suppliers(
        &self,
        user_id: &str,
        data_consumer_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<DataFlowElement>> {
        self.data_flows()
            .get_upstream(
                "getDataFlowSuppliers",
                user_id,
                data_consumer_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    // Control flow

    #[allow(clippy::too_many_arguments)]
    pub async fn setup_control_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        current_step_guid: &str,
        next_step_guid: &str,
        properties: Option<&ControlFlowProperties>,
        validity: EffectiveDates,
    ) -> Result<String> {
        self.control_flows()
            .setup(
                "setupControlFlow",
                user_id,
                source,
                is_home,
                current_step_guid,
                next_step_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn get_control_flow(
        &self,
        user_id: &str,
        current_step_guid: &str,
        next_step_guid: &str,
        qualified_name: Option<&str>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Result<ControlFlowElement> {
        self.control_flows()
            .get_between(
                "getControlFlow",
                user_id,
                current_step_guid,
                next_step_guid,
                qualified_name,
                effective_time,
            )
            .await
    }

    pub async fn update_control_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        control_flow_guid: &str,
        properties: Option<&ControlFlowProperties>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.control_flows()
            .update(
                "updateControlFlow",
                user_id,
                source,
                control_flow_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn clear_control_flow(
        &self,
        user_id: &str,
        source: &ExternalSource,
        control_flow_guid: &str,
    ) -> Result<()> {
        self.control_flows()
            .clear("clearControlFlow", user_id, source, control_flow_guid)
            .await
    }

    pub async fn get_control_flow_next_steps(
        &self,
        user_id: &str,
        current_step_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ControlFlowElement>> {
        self.control_flows()
            .get_downstream(
                "getControlFlowNextSteps",
                user_id,
                current_step_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_control_flow_previous_steps(
        &self,
        user_id: &str,
        next_step_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ControlFlowElement>> {
        self.control_flows()
            .get_upstream(
                "getControlFlowPreviousSteps",
                user_id,
                next_step_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    // Process call

    #[allow(clippy::too_many_arguments)]
    pub async fn setup_process_call(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        caller_guid: &str,
        called_guid: &str,
        properties: Option<&ProcessCallProperties>,
        validity: EffectiveDates,
    ) -> Result<String> {
        self.process_calls()
            .setup(
                "setupProcessCall",
                user_id,
                source,
                is_home,
                caller_guid,
                called_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn get_process_call(
        &self,
        user_id: &str,
        caller_guid: &str,
        called_guid: &str,
        qualified_name: Option<&str>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Result<ProcessCallElement> {
        self.process_calls()
            .get_between(
                "getProcessCall",
                user_id,
                caller_guid,
                called_guid,
                qualified_name,
                effective_time,
            )
            .await
    }

    pub async fn update_process_call(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_call_guid: &str,
        properties: Option<&ProcessCallProperties>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.process_calls()
            .update(
                "updateProcessCall",
                user_id,
                source,
                process_call_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn clear_process_call(
        &self,
        user_id: &str,
        source: &ExternalSource,
        process_call_guid: &str,
    ) -> Result<()> {
        self.process_calls()
            .clear("clearProcessCall", user_id, source, process_call_guid)
            .await
    }

    /// Processes called by `caller_guid`.
    pub async fn get_process_called(
        &self,
        user_id: &str,
        caller_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ProcessCallElement>> {
        self.process_calls()
            .get_downstream(
                "getProcessCalled",
                user_id,
                caller_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    /// Processes that call `called_guid`.
    pub async fn get_process_callers(
        &self,
        user_id: &str,
        called_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ProcessCallElement>> {
        self.process_calls()
            .get_upstream(
                "getProcessCallers",
                user_id,
                called_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    // Lineage mapping

    #[allow(clippy::too_many_arguments)]
    pub async fn setup_lineage_mapping(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        source_element_guid: &str,
        destination_element_guid: &str,
        properties: Option<&LineageMappingProperties>,
        validity: EffectiveDates,
    ) -> Result<String> {
        self.lineage_mappings()
            .setup(
                "setupLineageMapping",
                user_id,
                source,
                is_home,
                source_element_guid,
                destination_element_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn clear_lineage_mapping(
        &self,
        user_id: &str,
        source: &ExternalSource,
        lineage_mapping_guid: &str,
    ) -> Result<()> {
        self.lineage_mappings()
            .clear("clearLineageMapping", user_id, source, lineage_mapping_guid)
            .await
    }

    pub async fn get_destination_lineage_mappings(
        &self,
        user_id: &str,
        source_element_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<LineageMappingElement>> {
        self.lineage_mappings()
            .get_downstream(
                "getDestinationLineageMappings",
                user_id,
                source_element_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_source_lineage_mappings(
        &self,
        user_id: &str,
        destination_element_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<LineageMappingElement>> {
        self.lineage_mappings()
            .get_upstream(
                "getSourceLineageMappings",
                user_id,
                destination_element_guid,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }
}
