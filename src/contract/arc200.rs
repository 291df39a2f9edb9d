use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_bytes::ByteBuf;
use tracing::debug;

use crate::chain::{
    assign_group, decode_bool, decode_uint8, method_selector, return_value, BoxReference, EncodingError, Transaction
};
use crate::contract::{ContractError, TokenContract};
use crate::models::{TransferAttempt, TransferRequest};
use crate::network::{AlgodClient, NetworkError, ResourcesAccessed};
use crate::types::{Address, AssetId};

const DECIMALS: &str = "arc200_decimals()uint8";
const TRANSFER: &str = "arc200_transfer(address,uint256)bool";

/// ARC-200 token calls evaluated through the node's simulator, sent from `sender`.
pub struct Arc200Contract {
    algod: Arc<AlgodClient>,
    sender: Address
}

impl Arc200Contract {
    pub fn new(algod: Arc<AlgodClient>, sender: Address) -> Self {
        Self { algod, sender }
    }
}

#[async_trait]
impl TokenContract for Arc200Contract {
    async fn decimals(&self, asset_id: AssetId) -> Result<u8, ContractError> {
        let params = self.algod.suggested_params().await?;
        let call = Transaction::application_call(&params, self.sender, asset_id, vec![method_selector(DECIMALS).to_vec()]);
        let result = self.algod.simulate(&[call]).await?;

        if let Some(message) = result.failure() {
            return Err(ContractError::CallFailed { method: DECIMALS, detail: message.to_string() });
        }

        let logs = result.last_logs()?;

        return_value(&logs)
            .and_then(decode_uint8)
            .ok_or(ContractError::MissingReturn { method: DECIMALS })
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferAttempt, ContractError> {
        let params = self.algod.suggested_params().await?;
        let mut group = Vec::with_capacity(2);

        if let Some(amount) = request.payment_amount {
            group.push(Transaction::payment(&params, self.sender, Address::for_application(request.asset_id), amount));
        }

        group.push(Transaction::application_call(&params, self.sender, request.asset_id, vec![
            method_selector(TRANSFER).to_vec(),
            request.recipient.as_bytes().to_vec(),
            request.amount.to_uint256().to_vec()
        ]));
        assign_group(&mut group)?;

        let result = self.algod.simulate(&group).await?;

        if let Some(message) = result.failure() {
            return Ok(TransferAttempt::rejected(message, request.payment_amount));
        }

        let logs = result.last_logs()?;

        if return_value(&logs).and_then(decode_bool) == Some(false) {
            return Ok(TransferAttempt::rejected(format!("{TRANSFER} returned false"), request.payment_amount));
        }

        if let Some(call) = group.last_mut() {
            attach_resources(call, &result.resources())?;
        }

        assign_group(&mut group)?;

        let txns = group.iter()
            .map(Transaction::to_base64)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built {} transaction(s) for tokenId [{}] to [{}]", txns.len(), request.asset_id, request.recipient);

        Ok(TransferAttempt::accepted(txns, request.payment_amount))
    }
}

/// Makes the resources the simulator resolved on its own explicit on the call,
/// so the group also evaluates once it is signed and submitted.
fn attach_resources(call: &mut Transaction, resources: &ResourcesAccessed) -> Result<(), ContractError> {
    let app_id = call.app_id.unwrap_or_default();

    for account in &resources.accounts {
        let address = Address::from_str(account)
            .map_err(|error| NetworkError::InvalidResponse(format!("simulated account [{account}]: {error}")))?;

        if address != call.sender && !call.app_accounts.contains(&address) {
            call.app_accounts.push(address);
        }
    }

    for app in &resources.apps {
        if *app != app_id && !call.app_foreign_apps.contains(app) {
            call.app_foreign_apps.push(*app);
        }
    }

    for access in &resources.boxes {
        let index = if access.app == app_id {
            0
        } else {
            foreign_app_index(call, access.app)
        };
        let name = STANDARD.decode(&access.name).map_err(EncodingError::from)?;
        let reference = BoxReference {
            index,
            name: (!name.is_empty()).then(|| ByteBuf::from(name))
        };

        if !call.app_boxes.contains(&reference) {
            call.app_boxes.push(reference);
        }
    }

    for _ in 0..resources.extra_box_refs {
        call.app_boxes.push(BoxReference::default());
    }

    Ok(())
}

fn foreign_app_index(call: &mut Transaction, app: AssetId) -> u64 {
    let position = match call.app_foreign_apps.iter().position(|existing| *existing == app) {
        Some(position) => position,
        None => {
            call.app_foreign_apps.push(app);
            call.app_foreign_apps.len() - 1
        }
    };

    position as u64 + 1
}
