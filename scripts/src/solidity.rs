//! Definitions of Solidity functions called after deployment

use alloy::sol;

sol! {
    /// The administrative surface shared by the OTC manager contracts
    #[sol(rpc)]
    interface IOtcManager {
        function setCommissionAddress(address commissionAddress) external;
        function transferOwnership(address newOwner) external;
    }
}
