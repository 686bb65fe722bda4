//! Benchmarking setup for pallet-feicoin

use super::*;

#[allow(unused)]
use crate::Pallet as Feicoin;
use frame_benchmarking::v2::*;
use frame_support::BoundedVec;
use frame_system::RawOrigin;

fn assert_last_event<T: Config>(generic_event: <T as Config>::RuntimeEvent) {
    frame_system::Pallet::<T>::assert_last_event(generic_event.into());
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn mint_tokens() {
        let authority = T::Authority::resolve().expect("authority resolves");
        let recipient: T::AccountId = account("recipient", 0, 0);
        let recipient_text: AddressOf<T> =
            BoundedVec::try_from(T::AddressCodec::encode(&recipient)).expect("address fits");
        let denom: DenomOf<T> =
            BoundedVec::try_from(T::BenchmarkHelper::mint_denom()).expect("denom fits");
        let amount: u128 = 1_000_000;

        #[extrinsic_call]
        _(RawOrigin::Signed(authority.clone()), recipient_text.clone(), amount, denom.clone());

        assert_last_event::<T>(
            Event::<T>::TokensMinted {
                minter: BoundedVec::try_from(T::AddressCodec::encode(&authority))
                    .expect("address fits"),
                recipient: recipient_text,
                amount,
                denom,
            }
            .into(),
        );
    }

    impl_benchmark_test_suite!(Feicoin, crate::mock::new_test_ext(), crate::mock::Test);
}
