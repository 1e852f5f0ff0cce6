//! Solidity type definitions for the matching-engine contract.
//!
//! Call structs are used by the intent encoder to produce calldata; event
//! structs drive the receipt decoder. These must match the on-chain ABI.

use alloy_sol_types::sol;

sol! {
	/// One order in a `createOrders`/`updateOrders` batch.
	struct OrderInput {
		address base;
		address quote;
		bool isBid;
		bool isLimit;
		uint32 orderId;
		uint256 price;
		uint256 amount;
		uint32 n;
		address recipient;
		bool isETH;
	}

	/// One order in a `cancelOrders` batch.
	struct CancelInput {
		address base;
		address quote;
		bool isBid;
		uint32 orderId;
	}

	function marketBuy(address base, address quote, uint256 quoteAmount, bool isMaker, uint32 n, address recipient, uint32 slippageLimit);
	function marketSell(address base, address quote, uint256 baseAmount, bool isMaker, uint32 n, address recipient, uint32 slippageLimit);
	function limitBuy(address base, address quote, uint256 price, uint256 quoteAmount, bool isMaker, uint32 n, address recipient);
	function limitSell(address base, address quote, uint256 price, uint256 baseAmount, bool isMaker, uint32 n, address recipient);

	function marketBuyETH(address base, bool isMaker, uint32 n, address recipient, uint32 slippageLimit) payable;
	function marketSellETH(address quote, bool isMaker, uint32 n, address recipient, uint32 slippageLimit) payable;
	function limitBuyETH(address base, uint256 price, bool isMaker, uint32 n, address recipient) payable;
	function limitSellETH(address quote, uint256 price, bool isMaker, uint32 n, address recipient) payable;

	function createOrders(OrderInput[] orders) payable;
	function updateOrders(OrderInput[] orders) payable;
	function cancelOrders(CancelInput[] orders);

	/// Emitted when an order rests on the book.
	event OrderPlaced(address pair, uint32 id, address owner, bool isBid, uint256 price, uint256 placed);

	/// Emitted per match against resting liquidity.
	event OrderMatched(address pair, uint32 id, address owner, bool isBid, uint256 price, uint256 baseAmount, uint256 quoteAmount, uint256 total);

	event OrderCanceled(address pair, uint32 id, bool isBid, uint256 price, uint256 amount);

	event NewMarketPrice(address pair, uint256 price);

	event PairAdded(address pair, address base, address quote, uint256 listingPrice);

	event ListingCostSet(address payment, uint256 amount);

	event PairUpdated(address pair, address base, address quote);
}
