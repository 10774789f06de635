//! Minimal ABI bindings for the settings the tool reconciles.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    contract IClancyERC721 {
        function name() external view returns (string);
        function publicMintEnabled() external view returns (bool);
        function setPublicMintEnabled(bool status) external;
        function burnEnabled() external view returns (bool);
        function setBurnEnabled(bool status) external;
    }
}

sol! {
    #[sol(rpc)]
    contract IMarketplaceERC721Escrow {
        function allowedContracts(address token) external view returns (bool);
        function setAllowedContract(address token, bool allowed) external;
    }
}

sol! {
    #[sol(rpc)]
    contract IEscrowERC721 {
        function vendors(address token) external view returns (bool);
        function setVendorStatus(address token, bool status) external;
    }
}

// Moments and Reels share the case allow-list.
sol! {
    #[sol(rpc)]
    contract ICaseLinked {
        function caseContracts(address case_contract) external view returns (bool);
        function setCaseContract(address case_contract, bool status) external;
    }
}

sol! {
    #[sol(rpc)]
    contract ISeries1Case {
        function momentsContract() external view returns (address);
        function setMomentsContract(address moments) external;
        function reelsContract() external view returns (address);
        function setReelsContract(address reels) external;
    }
}
