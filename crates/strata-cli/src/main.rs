// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `strata` binary.

fn main() -> anyhow::Result<()> {
    strata_cli::entrypoint()
}
