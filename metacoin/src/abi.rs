alloy::sol! {
    #[sol(rpc)]
    contract MetaCoin {
        event Transfer(address indexed _from, address indexed _to, uint256 _value);

        // returns false (no revert, no event) when the sender is short
        function sendCoin(address receiver, uint256 amount) returns (bool sufficient);
        function getBalanceInEth(address addr) view returns (uint256);
        function getBalance(address addr) view returns (uint256);
    }
}

alloy::sol! {
    #[sol(rpc)]
    contract Voting {
        function totalVotes(uint256[] userArray) returns (uint256);
        function voteA() view returns (uint256);
        function voteB() view returns (uint256);
    }
}
