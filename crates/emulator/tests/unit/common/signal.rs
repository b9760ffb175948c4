//! Signal Numbering Unit Tests.

use pretty_assertions::assert_eq;
use sw64_unaligned::common::{SigCode, SigInfo, Signal, VirtAddr};

#[test]
fn signal_numbers_follow_the_alpha_abi() {
    assert_eq!(Signal::Bus.number(), 10);
    assert_eq!(Signal::Segv.number(), 11);
}

#[test]
fn si_codes() {
    assert_eq!(SigCode::MapErr.value(), 1);
    assert_eq!(SigCode::AccErr.value(), 2);
    assert_eq!(SigCode::AdrAln.value(), 1);
}

#[test]
fn constructors_fill_every_field() {
    let addr = VirtAddr::new(0x1001);
    let bus = SigInfo::bus_adraln(addr);
    assert_eq!(
        bus,
        SigInfo {
            signal: Signal::Bus,
            code: SigCode::AdrAln,
            addr,
            extra: 0
        }
    );
    let segv = SigInfo::segv(SigCode::MapErr, addr);
    assert_eq!(segv.signal, Signal::Segv);
    assert_eq!(segv.code, SigCode::MapErr);
}

#[test]
fn display_names_signal_and_code() {
    let text = SigInfo::segv(SigCode::AccErr, VirtAddr::new(0x10)).to_string();
    assert!(text.contains("SIGSEGV"), "got {text}");
    assert!(text.contains("SEGV_ACCERR"), "got {text}");
}
