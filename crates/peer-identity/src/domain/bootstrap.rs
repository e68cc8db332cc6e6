//! Peer bootstrap policy.
//!
//! Bootstrapping (DNS-seed style discovery) touches public infrastructure and
//! reveals the node, so it defaults on for real networks and off for
//! throwaway ones, with an operator override.

use super::network::NetworkSelection;

/// Decide whether automated peer discovery may run.
///
/// Precedence:
/// 1. simnet, regtest or signet selected: never bootstrap
/// 2. `no_auto_bootstrap` set: don't bootstrap
/// 3. otherwise bootstrap
///
/// Multiple network flags are not rejected here; rule 1 wins whenever any dev
/// network flag is present.
pub fn should_peer_bootstrap(selection: &NetworkSelection) -> bool {
    let dev_network = selection.simnet || selection.regtest || selection.signet;

    !dev_network && !selection.no_auto_bootstrap
}
