#[cfg(test)]
mod tests {
    use crate::errors::EscrowError;
    use crate::state::*;
    use anchor_lang::error::Error;
    use anchor_lang::prelude::*;

    const PRICE: u64 = 1_000_000;
    const BUYER_FUNDS: u64 = 5_000_000;
    // Rent-exempt minimum of a data-less account
    const RENT_RESERVE: u64 = 890_880;

    /// Accounts of one marketplace plus a seller and a buyer, with plain lamport
    /// balances standing in for the system program.
    struct Market {
        marketplace: MarketplaceConfig,
        treasury: Treasury,
        seller: UserAccount,
        buyer: UserAccount,
        seller_lamports: u64,
        buyer_lamports: u64,
        treasury_lamports: u64,
    }

    impl Market {
        fn new(fee_bps: u16) -> Self {
            let authority = Pubkey::new_unique();
            let marketplace_key = Pubkey::new_unique();
            Self {
                marketplace: MarketplaceConfig::new(
                    authority,
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    fee_bps,
                    255,
                    254,
                )
                .unwrap(),
                treasury: Treasury::new(marketplace_key, 254),
                seller: UserAccount::new(Pubkey::new_unique(), 253),
                buyer: UserAccount::new(Pubkey::new_unique(), 252),
                seller_lamports: 0,
                buyer_lamports: BUYER_FUNDS,
                treasury_lamports: 0,
            }
        }

        fn list(&mut self, price: u64) -> Result<ListingAccount> {
            let listing = ListingAccount::new(
                Pubkey::new_unique(),
                self.seller.authority,
                Pubkey::new_unique(),
                ListingParams {
                    name: "Pika #7".to_string(),
                    symbol: "PIKA".to_string(),
                    price,
                    card_metadata: "{\"rarity\":\"holo\"}".to_string(),
                    image_url: "https://arweave.net/pika-7.png".to_string(),
                },
                1_700_000_000,
                251,
            )?;
            commit_new_listing(&mut self.marketplace, &mut self.seller)?;
            Ok(listing)
        }

        /// Same order as the instruction: prepare, move value, apply.
        fn purchase(&mut self, listing: &mut ListingAccount) -> Result<SalePlan> {
            let plan = SalePlan::prepare(
                listing,
                &self.marketplace,
                self.buyer.authority,
                self.buyer_lamports,
                RENT_RESERVE,
            )?;

            self.buyer_lamports -= plan.split.price;
            self.seller_lamports += plan.split.seller_proceeds;
            self.treasury_lamports += plan.split.fee;

            plan.apply(SaleLedger {
                listing,
                marketplace: &mut self.marketplace,
                treasury: &mut self.treasury,
                seller: &mut self.seller,
                buyer: &mut self.buyer,
            })?;
            Ok(plan)
        }

        fn cancel(&mut self, listing: &mut ListingAccount, caller: Pubkey) -> Result<()> {
            let plan = CancelPlan::prepare(listing, caller)?;
            plan.apply(listing, &mut self.marketplace, &mut self.seller)
        }
    }

    #[test]
    fn test_list_updates_only_owner_counters() {
        let mut market = Market::new(1000);
        let buyer_before = market.buyer.clone();

        let listing = market.list(PRICE).unwrap();

        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(market.seller.nft_listed, 1);
        assert_eq!(market.marketplace.active_listings, 1);
        assert_eq!(market.buyer, buyer_before);
    }

    #[test]
    fn test_list_with_zero_price_fails() {
        let mut market = Market::new(1000);

        assert_eq!(market.list(0).unwrap_err(), Error::from(EscrowError::InvalidPrice));
        assert_eq!(market.seller.nft_listed, 0);
        assert_eq!(market.marketplace.active_listings, 0);
    }

    #[test]
    fn test_purchase_splits_fee_and_updates_counters() {
        let mut market = Market::new(1000); // 10%
        let mut listing = market.list(PRICE).unwrap();

        let plan = market.purchase(&mut listing).unwrap();

        assert_eq!(plan.split.fee, 100_000);
        assert_eq!(plan.split.seller_proceeds, 900_000);
        assert_eq!(market.treasury_lamports, 100_000);
        assert_eq!(market.seller_lamports, 900_000);
        assert_eq!(market.buyer_lamports, BUYER_FUNDS - PRICE);

        assert_eq!(listing.status, ListingStatus::Sold);
        assert_eq!(market.seller.nft_sold, 1);
        assert_eq!(market.seller.nft_listed, 0);
        assert_eq!(market.buyer.nft_bought, 1);

        assert_eq!(market.marketplace.active_listings, 0);
        assert_eq!(market.marketplace.total_sales, 1);
        assert_eq!(market.marketplace.total_volume, PRICE);
        assert_eq!(market.treasury.total_collected, 100_000);
    }

    #[test]
    fn test_second_purchase_fails_without_side_effects() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();
        market.purchase(&mut listing).unwrap();

        let listing_after_sale = listing.clone();
        let balances = (market.buyer_lamports, market.seller_lamports, market.treasury_lamports);

        assert_eq!(
            market.purchase(&mut listing).unwrap_err(),
            Error::from(EscrowError::ListingNotActive)
        );
        assert_eq!(listing, listing_after_sale);
        assert_eq!(
            (market.buyer_lamports, market.seller_lamports, market.treasury_lamports),
            balances
        );
        assert_eq!(market.buyer.nft_bought, 1);
        assert_eq!(market.treasury.total_collected, 100_000);
    }

    #[test]
    fn test_competing_purchases_settle_once() {
        let mut market = Market::new(250);
        let mut listing = market.list(PRICE).unwrap();
        let rival = UserAccount::new(Pubkey::new_unique(), 250);

        // The runtime serializes writers of the same listing; both buyers
        // prepared against the same Active snapshot.
        let snapshot = listing.clone();
        let first = SalePlan::prepare(
            &snapshot,
            &market.marketplace,
            market.buyer.authority,
            BUYER_FUNDS,
            RENT_RESERVE,
        )
        .unwrap();
        let second = SalePlan::prepare(
            &snapshot,
            &market.marketplace,
            rival.authority,
            BUYER_FUNDS,
            RENT_RESERVE,
        )
        .unwrap();

        let mut rival = rival;
        first
            .apply(SaleLedger {
                listing: &mut listing,
                marketplace: &mut market.marketplace,
                treasury: &mut market.treasury,
                seller: &mut market.seller,
                buyer: &mut market.buyer,
            })
            .unwrap();
        let result = second.apply(SaleLedger {
            listing: &mut listing,
            marketplace: &mut market.marketplace,
            treasury: &mut market.treasury,
            seller: &mut market.seller,
            buyer: &mut rival,
        });

        assert_eq!(result.unwrap_err(), Error::from(EscrowError::ListingNotActive));
        assert_eq!(rival.nft_bought, 0);
        assert_eq!(market.marketplace.total_sales, 1);
        assert_eq!(market.seller.nft_sold, 1);
        assert_eq!(market.treasury.total_collected, first.split.fee);
        assert_eq!(market.treasury.total_collected, 25_000);
    }

    #[test]
    fn test_purchase_preconditions() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();

        // Seller buying their own listing
        let self_purchase = SalePlan::prepare(
            &listing,
            &market.marketplace,
            market.seller.authority,
            BUYER_FUNDS,
            RENT_RESERVE,
        );
        assert_eq!(self_purchase.unwrap_err(), Error::from(EscrowError::SelfPurchaseNotAllowed));

        // One lamport short
        market.buyer_lamports = PRICE - 1;
        assert_eq!(
            market.purchase(&mut listing).unwrap_err(),
            Error::from(EscrowError::InsufficientFunds)
        );
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(market.seller_lamports, 0);

        // Exactly the price is enough
        market.buyer_lamports = PRICE;
        market.purchase(&mut listing).unwrap();
        assert_eq!(market.buyer_lamports, 0);
    }

    #[test]
    fn test_purchase_keeps_buyer_rent_exempt() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();

        // Paying would leave a balance the runtime rejects
        for lamports in [PRICE + 1, PRICE + RENT_RESERVE - 1] {
            market.buyer_lamports = lamports;
            assert_eq!(
                market.purchase(&mut listing).unwrap_err(),
                Error::from(EscrowError::InsufficientFunds)
            );
        }
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(market.buyer.nft_bought, 0);

        market.buyer_lamports = PRICE + RENT_RESERVE;
        market.purchase(&mut listing).unwrap();
        assert_eq!(market.buyer_lamports, RENT_RESERVE);
        assert_eq!(market.buyer.nft_bought, 1);
    }

    #[test]
    fn test_apply_rejects_foreign_user_accounts() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();
        let plan = SalePlan::prepare(
            &listing,
            &market.marketplace,
            market.buyer.authority,
            BUYER_FUNDS,
            RENT_RESERVE,
        )
        .unwrap();

        let mut stranger = UserAccount::new(Pubkey::new_unique(), 200);
        let result = plan.apply(SaleLedger {
            listing: &mut listing,
            marketplace: &mut market.marketplace,
            treasury: &mut market.treasury,
            seller: &mut market.seller,
            buyer: &mut stranger,
        });

        assert_eq!(result.unwrap_err(), Error::from(EscrowError::NotRegistered));
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(stranger.nft_bought, 0);
    }

    #[test]
    fn test_failed_apply_leaves_every_record_untouched() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();
        // Counter drifted out from under the listing
        market.seller.nft_listed = 0;

        let plan = SalePlan::prepare(
            &listing,
            &market.marketplace,
            market.buyer.authority,
            BUYER_FUNDS,
            RENT_RESERVE,
        )
        .unwrap();
        let before = (
            listing.clone(),
            market.marketplace.clone(),
            market.treasury.clone(),
            market.buyer.clone(),
        );

        let result = plan.apply(SaleLedger {
            listing: &mut listing,
            marketplace: &mut market.marketplace,
            treasury: &mut market.treasury,
            seller: &mut market.seller,
            buyer: &mut market.buyer,
        });

        assert_eq!(result.unwrap_err(), Error::from(EscrowError::MathOverflow));
        assert_eq!(
            (listing, market.marketplace, market.treasury, market.buyer),
            before
        );
    }

    #[test]
    fn test_fee_extremes() {
        let mut free = Market::new(0);
        let mut listing = free.list(PRICE).unwrap();
        free.purchase(&mut listing).unwrap();
        assert_eq!(free.seller_lamports, PRICE);
        assert_eq!(free.treasury_lamports, 0);
        assert_eq!(free.treasury.total_collected, 0);

        let mut full = Market::new(10_000);
        let mut listing = full.list(PRICE).unwrap();
        full.purchase(&mut listing).unwrap();
        assert_eq!(full.seller_lamports, 0);
        assert_eq!(full.treasury_lamports, PRICE);
    }

    #[test]
    fn test_cancel_by_non_owner_fails() {
        let mut market = Market::new(1000);
        let mut listing = market.list(PRICE).unwrap();
        let before = (listing.clone(), market.marketplace.clone(), market.seller.clone());

        let result = market.cancel(&mut listing, Pubkey::new_unique());

        assert_eq!(result.unwrap_err(), Error::from(EscrowError::NotOwner));
        assert_eq!((listing, market.marketplace, market.seller), before);
    }

    #[test]
    fn test_list_then_cancel_round_trip() {
        let mut market = Market::new(1000);
        let marketplace_before = market.marketplace.clone();
        let treasury_before = market.treasury.clone();
        let seller_before = market.seller.clone();

        let mut listing = market.list(PRICE).unwrap();
        let owner = listing.owner;
        market.cancel(&mut listing, owner).unwrap();

        assert_eq!(listing.status, ListingStatus::Cancelled);
        assert_eq!(market.seller, seller_before);
        assert_eq!(market.marketplace, marketplace_before);
        assert_eq!(market.treasury, treasury_before);
        assert_eq!(market.treasury_lamports, 0);
    }

    #[test]
    fn test_terminal_listings_cannot_be_cancelled_or_bought() {
        let mut market = Market::new(1000);
        let mut cancelled = market.list(PRICE).unwrap();
        let owner = cancelled.owner;
        market.cancel(&mut cancelled, owner).unwrap();

        assert_eq!(
            market.cancel(&mut cancelled, owner).unwrap_err(),
            Error::from(EscrowError::ListingNotActive)
        );
        assert_eq!(
            market.purchase(&mut cancelled).unwrap_err(),
            Error::from(EscrowError::ListingNotActive)
        );

        let mut sold = market.list(PRICE).unwrap();
        market.purchase(&mut sold).unwrap();
        assert_eq!(
            market.cancel(&mut sold, owner).unwrap_err(),
            Error::from(EscrowError::ListingNotActive)
        );
        assert_eq!(market.seller.nft_listed, 0);
    }

    #[test]
    fn test_counters_track_active_listings() {
        let mut market = Market::new(500);
        let mut first = market.list(PRICE).unwrap();
        let mut second = market.list(2 * PRICE).unwrap();
        let _third = market.list(3 * PRICE).unwrap();
        assert_eq!(market.seller.nft_listed, 3);

        market.purchase(&mut first).unwrap();
        let owner = second.owner;
        market.cancel(&mut second, owner).unwrap();

        assert_eq!(market.seller.nft_listed, 1);
        assert_eq!(market.seller.nft_sold, 1);
        assert_eq!(market.marketplace.active_listings, 1);
        assert_eq!(market.marketplace.total_sales, 1);
        assert_eq!(market.marketplace.total_volume, PRICE);
    }
}
