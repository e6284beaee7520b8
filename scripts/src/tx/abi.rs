use alloy::sol;

sol! {
    /// Chainlink's mock price feed, the LINK/ETH feed on development chains
    contract MockV3Aggregator {
        constructor(uint8 _decimals, int256 _initialAnswer);
    }
}
