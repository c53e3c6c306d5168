use alloy_primitives::{Address, Bytes};
use common::{world::CallContext, NetworkId};
use tracing::info;

use crate::{BridgeExtension, DependencyDescriptor, ExtensionError, JumpPoint};

/// Handles a claimed bridge-and-call message: checks it came from the
/// extension on `origin_network` through the bridge, that the asset it depends
/// on was claimed, then deploys and runs its JumpPoint.
pub fn on_message_received_handler(
    extension: &BridgeExtension,
    cx: &mut CallContext<'_>,
    origin_address: Address,
    origin_network: NetworkId,
    data: &Bytes,
) -> Result<(), ExtensionError> {
    if cx.sender != extension.bridge() {
        return Err(ExtensionError::SenderMustBeBridge);
    }
    if origin_address != extension.address() {
        return Err(ExtensionError::OriginMustBeBridgeExtension);
    }

    let descriptor = DependencyDescriptor::abi_decode(data)?;
    if !cx
        .bridge
        .is_claimed(descriptor.depends_on_index, origin_network)
    {
        return Err(ExtensionError::UnclaimedAsset);
    }

    let jump_point = JumpPoint::new(extension.bridge(), &descriptor);
    let address = jump_point.address(
        extension.address(),
        descriptor.depends_on_index,
        origin_network,
    );
    cx.world
        .mark_deployed(address)
        .map_err(|_| ExtensionError::JumpPointAlreadyDeployed(address))?;

    let outcome = jump_point.run(cx.world, cx.bridge, address);
    info!(
        jump_point = %address,
        depends_on_index = descriptor.depends_on_index,
        origin_network,
        ?outcome,
        "jump point ran"
    );
    Ok(())
}
