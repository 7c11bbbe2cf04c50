use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use strum::IntoEnumIterator;

use crate::Label;
use crate::Nucleotide;
use crate::Stack;
use crate::NCOUNT;
use crate::ThermoError;
use crate::parameters::{DEFAULT_PARAMETER_DIR, HELIX_FILE, STACK_DH_FILE, STACK_DS_FILE};
use crate::parameter_parsing::{parse_records, RecordParser};
use crate::parameter_parsing::{HelixParser, HelixRecords, StackParser, StackRecords};
use crate::parameter_parsing::QuartetTable;

pub const K0: f64 = 273.15;

/// Value of every quartet that involves [`Nucleotide::Other`]: an open or
/// terminal position adds no stacking term.
pub const SENTINEL_ENERGY: i16 = 0;

/// Value of canonical quartets marked `.` or `INF` in the stacking grids.
pub const UNSTACKABLE: i16 = 14000;

/// Helix stacking enthalpies and entropies plus the helix penalties.
///
/// All values are in tenths of the file units: ΔH in 0.1 kcal/mol, ΔS in
/// 0.1 cal/(mol K). A table only exists fully populated: every constructor
/// either returns a complete table or an error, and there is no way to
/// modify it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTable {
    dh: QuartetTable<i16>,
    ds: QuartetTable<i16>,
    stackable: QuartetTable<bool>,
    dhi: i16,
    dsi: i16,
    dss: i16,
    dha: i16,
    dsa: i16,
    dh_label: Label,
    ds_label: Label,
    helix_label: Label,
}

impl ParameterTable {
    /// Load from `path`, or from [`DEFAULT_PARAMETER_DIR`] if `None`.
    pub fn new(path: Option<&Path>) -> Result<Self, ThermoError> {
        let dir = path.unwrap_or_else(|| Path::new(DEFAULT_PARAMETER_DIR));
        Self::read(dir)
    }

    pub fn default_parameters() -> Result<Self, ThermoError> {
        Self::new(None)
    }

    /// Parse `stack.dh`, `stack.ds` and `helix.dat` from `dir`.
    pub fn read<P: AsRef<Path>>(dir: P) -> Result<Self, ThermoError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ThermoError::FileNotFound(dir.to_path_buf()));
        }
        for name in [STACK_DH_FILE, STACK_DS_FILE, HELIX_FILE] {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(ThermoError::FileNotFound(path));
            }
        }

        let dh = parse_file(&dir.join(STACK_DH_FILE), StackParser::new(STACK_DH_FILE))?;
        let ds = parse_file(&dir.join(STACK_DS_FILE), StackParser::new(STACK_DS_FILE))?;
        let helix = parse_file(&dir.join(HELIX_FILE), HelixParser::new(HELIX_FILE))?;

        let table = Self::assemble(dh, ds, helix)?;
        debug!("Loaded helix parameters from {}", dir.display());
        Ok(table)
    }

    /// Same as [`ParameterTable::read`], on already opened sources.
    pub fn from_readers<R1, R2, R3>(dh: R1, ds: R2, helix: R3) -> Result<Self, ThermoError>
    where
        R1: BufRead,
        R2: BufRead,
        R3: BufRead,
    {
        let dh = parse_records(dh, Path::new(STACK_DH_FILE), StackParser::new(STACK_DH_FILE))?;
        let ds = parse_records(ds, Path::new(STACK_DS_FILE), StackParser::new(STACK_DS_FILE))?;
        let helix = parse_records(helix, Path::new(HELIX_FILE), HelixParser::new(HELIX_FILE))?;
        Self::assemble(dh, ds, helix)
    }

    fn assemble(
        (dh_header, dh): (String, StackRecords),
        (ds_header, ds): (String, StackRecords),
        (helix_header, helix): (String, HelixRecords),
    ) -> Result<Self, ThermoError> {
        let mut dh_table = [[[[SENTINEL_ENERGY; NCOUNT]; NCOUNT]; NCOUNT]; NCOUNT];
        let mut ds_table = [[[[SENTINEL_ENERGY; NCOUNT]; NCOUNT]; NCOUNT]; NCOUNT];
        let mut stackable = [[[[false; NCOUNT]; NCOUNT]; NCOUNT]; NCOUNT];

        for stack in canonical_stacks() {
            let (i, j, k, l) = stack.indices();
            let (h, s) = match (dh.values[i][j][k][l], ds.values[i][j][k][l]) {
                (Some(h), Some(s)) => {
                    stackable[i][j][k][l] = true;
                    (h, s)
                }
                (None, None) => (UNSTACKABLE, UNSTACKABLE),
                (Some(_), None) => {
                    return Err(ThermoError::incomplete(STACK_DS_FILE,
                        format!("no entropy for stack {} given in {}", stack, STACK_DH_FILE)));
                }
                (None, Some(_)) => {
                    return Err(ThermoError::incomplete(STACK_DH_FILE,
                        format!("no enthalpy for stack {} given in {}", stack, STACK_DS_FILE)));
                }
            };
            dh_table[i][j][k][l] = h;
            ds_table[i][j][k][l] = s;
        }
        debug!("Stacking table complete: {} stacks with data", dh.count());

        Ok(ParameterTable {
            dh: dh_table,
            ds: ds_table,
            stackable,
            dhi: helix.dhi,
            dsi: helix.dsi,
            dss: helix.dss,
            dha: helix.dha,
            dsa: helix.dsa,
            dh_label: Label::new(&dh_header),
            ds_label: Label::new(&ds_header),
            helix_label: Label::new(&helix_header),
        })
    }

    /// Stacking enthalpy of `5'-ik-3'/3'-jl-5'`.
    pub fn dh(&self, i: Nucleotide, j: Nucleotide, k: Nucleotide, l: Nucleotide) -> i16 {
        self.dh[i.index()][j.index()][k.index()][l.index()]
    }

    /// Stacking entropy of `5'-ik-3'/3'-jl-5'`.
    pub fn ds(&self, i: Nucleotide, j: Nucleotide, k: Nucleotide, l: Nucleotide) -> i16 {
        self.ds[i.index()][j.index()][k.index()][l.index()]
    }

    pub fn stack_dh(&self, stack: &Stack) -> i16 {
        self.dh(stack.i, stack.j, stack.k, stack.l)
    }

    pub fn stack_ds(&self, stack: &Stack) -> i16 {
        self.ds(stack.i, stack.j, stack.k, stack.l)
    }

    /// Helix initiation enthalpy.
    pub fn dhi(&self) -> i16 {
        self.dhi
    }

    /// Helix initiation entropy.
    pub fn dsi(&self) -> i16 {
        self.dsi
    }

    /// Entropy correction for self-complementary helices.
    pub fn dss(&self) -> i16 {
        self.dss
    }

    /// Terminal A·U enthalpy penalty.
    pub fn dha(&self) -> i16 {
        self.dha
    }

    /// Terminal A·U entropy penalty.
    pub fn dsa(&self) -> i16 {
        self.dsa
    }

    pub fn dh_label(&self) -> &Label {
        &self.dh_label
    }

    pub fn ds_label(&self) -> &Label {
        &self.ds_label
    }

    pub fn helix_label(&self) -> &Label {
        &self.helix_label
    }

    /// Canonical quartet with numeric ΔH and ΔS in the grids.
    pub fn is_stackable(&self, stack: &Stack) -> bool {
        let (i, j, k, l) = stack.indices();
        self.stackable[i][j][k][l]
    }

    /// All stackable quartets in index order.
    pub fn stacks(&self) -> impl Iterator<Item = Stack> + '_ {
        canonical_stacks().filter(move |s| self.is_stackable(s))
    }

    /// ΔG = ΔH - TΔS of a stack in 0.1 kcal/mol at `temperature` (Celsius).
    pub fn stack_free_energy(&self, stack: &Stack, temperature: f64) -> i32 {
        if stack.has_sentinel() {
            return SENTINEL_ENERGY as i32;
        }
        if !self.is_stackable(stack) {
            return UNSTACKABLE as i32;
        }
        free_energy(self.stack_dh(stack), self.stack_ds(stack), temperature)
    }

    pub fn initiation_free_energy(&self, temperature: f64) -> i32 {
        free_energy(self.dhi, self.dsi, temperature)
    }

    pub fn terminal_au_free_energy(&self, temperature: f64) -> i32 {
        free_energy(self.dha, self.dsa, temperature)
    }

    pub fn symmetry_free_energy(&self, temperature: f64) -> i32 {
        free_energy(0, self.dss, temperature)
    }
}

fn parse_file<P: RecordParser>(path: &Path, parser: P) -> Result<(String, P::Output), ThermoError> {
    debug!("Reading parameter file: {}", path.display());
    let file = File::open(path).map_err(|e| ThermoError::from_io(path, e))?;
    parse_records(BufReader::new(file), path, parser)
}

/// All 256 quartets over A, C, G, U in index order.
fn canonical_stacks() -> impl Iterator<Item = Stack> {
    let canonical = || Nucleotide::iter().filter(|n| !n.is_sentinel());
    canonical().flat_map(move |i| {
        canonical().flat_map(move |j| {
            canonical().flat_map(move |k| {
                canonical().map(move |l| Stack::new(i, j, k, l))
            })
        })
    })
}

/// ΔH in 0.1 kcal/mol and ΔS in 0.1 cal/(mol K), result in 0.1 kcal/mol.
fn free_energy(dh: i16, ds: i16, temperature: f64) -> i32 {
    let kelvin = temperature + K0;
    (dh as f64 - kelvin * ds as f64 / 1000.0).round() as i32
}
