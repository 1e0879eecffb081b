//! Full-document round trips through the canonical writer and the lenient
//! loader.

use chrono::NaiveDate;
use gim_core::meta::Meta;
use gim_core::quantities::multi_phase::{
    ActivePower as MpActivePower, ApparentPower as MpApparentPower, CosPhi, Droop,
    PhaseConnections, ReactivePower as MpReactivePower, Voltage as MpVoltage,
};
use gim_core::quantities::single_phase::{
    AdmittancePosSeq, ApparentPower, Current, Frequency, ImpedancePosSeq, Length,
    PhaseAngleClock, Voltage,
};
use gim_core::quantities::Phase;
use gim_core::steadystate::controller::{
    ControlPConst, ControlQU, PControlType, PController, QControlType, QController,
};
use gim_core::steadystate::{external_grid, load, transformer, SteadystateCase};
use gim_core::topology::{
    Branch, BranchType, ExternalGrid, GridType, Load, LoadModel, LoadSystemType, LoadType, Node,
    RatedPower, TapSide, Topology, Transformer, TransformerPhaseTechnologyType, VectorGroup,
    Winding, WindingVectorGroup,
};
use gim_core::topology_case::{ElementState, TopologyCase};
use gim_core::{GimError, VoltageSystemType};

fn meta() -> Meta {
    Meta::new("test_grid", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .with_project("interchange-tests")
}

fn abc_connections() -> PhaseConnections {
    PhaseConnections::new([
        Some((Phase::A, Phase::N)),
        Some((Phase::B, Phase::N)),
        Some((Phase::C, Phase::N)),
    ])
    .unwrap()
}

fn sample_load(name: &str) -> Load {
    let u_0 = MpVoltage::new([400.0, 400.0, 400.0]).unwrap();
    Load {
        name: name.into(),
        node: "Bus LV".into(),
        rated_power: RatedPower::from_apparent_power(
            MpApparentPower::new([1100.0, 1100.0, 1100.0]).unwrap(),
            CosPhi::new([0.95, 0.95, 0.95]).unwrap(),
        )
        .unwrap(),
        active_power_model: LoadModel::new(u_0.clone(), 0.7, 0.2).unwrap(),
        reactive_power_model: LoadModel::constant_power(u_0),
        phase_connections: abc_connections(),
        phase_connection_type: None,
        type_: LoadType::Consumer,
        system_type: LoadSystemType::FixedConsumption,
        voltage_system_type: VoltageSystemType::Ac,
        description: Some("household equivalent".into()),
        optional_data: None,
    }
}

fn sample_winding(node: &str, u_r: f64) -> Winding {
    Winding {
        node: node.into(),
        s_r: ApparentPower::new(630_000.0).unwrap(),
        u_n: Voltage::new(u_r).unwrap(),
        u_r: Voltage::new(u_r).unwrap(),
        r1: ImpedancePosSeq::new(1.2).unwrap(),
        x1: ImpedancePosSeq::new(3.9).unwrap(),
        r0: None,
        x0: None,
        re: None,
        xe: None,
        phase_angle_clock: Some(PhaseAngleClock::new(0.0).unwrap()),
        vector_group: Some(WindingVectorGroup::YN),
        neutral_connected: true,
        optional_data: None,
    }
}

fn sample_topology() -> Topology {
    let mut topology = Topology::new(meta());
    topology.nodes = vec![
        Node::new("Bus HV", Voltage::new(20_000.0).unwrap()),
        Node::new("Bus LV", Voltage::new(400.0).unwrap())
            .with_phases([Phase::A, Phase::B, Phase::C, Phase::N]),
    ];
    topology.branches = vec![Branch {
        name: "Line HV".into(),
        node_1: "Bus HV".into(),
        node_2: "Bus HV 2".into(),
        phases_1: None,
        phases_2: None,
        u_n: Voltage::new(20_000.0).unwrap(),
        i_r: Some(Current::new(265.0).unwrap()),
        r1: ImpedancePosSeq::new(0.313).unwrap(),
        x1: ImpedancePosSeq::new(0.12).unwrap(),
        g1: AdmittancePosSeq::new(0.0).unwrap(),
        b1: AdmittancePosSeq::new(2.7e-7).unwrap(),
        type_: BranchType::Line,
        voltage_system_type: VoltageSystemType::Ac,
        r0: None,
        x0: None,
        g0: None,
        b0: None,
        rn: None,
        xn: None,
        gn: None,
        bn: None,
        rpn: None,
        xpn: None,
        gpn: None,
        bpn: None,
        f_n: Some(Frequency::new(50.0).unwrap()),
        length: Some(Length::new(850.0).unwrap()),
        energized: Some(true),
        description: None,
        optional_data: None,
    }];
    topology.loads = vec![sample_load("Load 1")];
    topology.transformers = vec![Transformer {
        name: "Trafo 1".into(),
        node_1: "Bus HV".into(),
        node_2: "Bus LV".into(),
        phases_1: None,
        phases_2: None,
        number: 1,
        vector_group: VectorGroup::Dyn5,
        windings: vec![
            sample_winding("Bus HV", 20_000.0),
            sample_winding("Bus LV", 400.0),
        ],
        r_fe1: ImpedancePosSeq::new(1500.0).unwrap(),
        x_h1: ImpedancePosSeq::new(2800.0).unwrap(),
        r_fe0: None,
        x_h0: None,
        phase_technology_type: Some(TransformerPhaseTechnologyType::ThreePh),
        tap_u_mag: Some(Voltage::new(500.0).unwrap()),
        tap_u_phi: None,
        tap_max: Some(2),
        tap_min: Some(-2),
        tap_neutral: Some(0),
        tap_side: Some(TapSide::Hv),
        description: None,
        optional_data: None,
    }];
    topology.external_grids = vec![ExternalGrid {
        name: "HV Grid".into(),
        node: "Bus HV".into(),
        phases: None,
        type_: GridType::Sl,
        short_circuit_power_max: ApparentPower::new(1e9).unwrap(),
        short_circuit_power_min: ApparentPower::new(5e8).unwrap(),
        description: None,
        optional_data: None,
    }];
    topology
}

fn sample_steadystate(meta: Meta) -> SteadystateCase {
    let mut case = SteadystateCase::new(meta);
    case.loads = vec![load::Load {
        name: "Load 1".into(),
        active_power: load::ActivePower {
            controller: Some(PController::new(
                "Bus LV",
                PControlType::PConst(ControlPConst {
                    p_set: MpActivePower::new([1000.0, 1000.0, 1000.0]).unwrap(),
                }),
            )),
        },
        reactive_power: load::ReactivePower {
            controller: Some(QController::new(
                "Bus LV",
                QControlType::QU(ControlQU {
                    droop_up: Droop::new([8.0, 8.0, 8.0]).unwrap(),
                    droop_low: Droop::new([8.0, 8.0, 8.0]).unwrap(),
                    u_q0: MpVoltage::new([400.0, 400.0, 400.0]).unwrap(),
                    u_deadband_up: MpVoltage::new([10.0, 10.0, 10.0]).unwrap(),
                    u_deadband_low: MpVoltage::new([10.0, 10.0, 10.0]).unwrap(),
                    q_max_ue: MpReactivePower::new([3000.0, 3000.0, 3000.0]).unwrap(),
                    q_max_oe: MpReactivePower::new([3000.0, 3000.0, 3000.0]).unwrap(),
                }),
            )),
        },
    }];
    case.transformers = vec![transformer::Transformer {
        name: "Trafo 1".into(),
        tap_pos: Some(0),
    }];
    case.external_grids = vec![external_grid::ExternalGrid::new("HV Grid")];
    case
}

#[test]
fn test_topology_round_trip() {
    let topology = sample_topology();
    let json = gim_io::to_json_string(&topology).unwrap();
    let back: Topology = gim_io::from_json_str(&json).unwrap();
    assert_eq!(topology, back);
}

#[test]
fn test_steadystate_round_trip_and_consistency() {
    let topology = sample_topology();
    let case = sample_steadystate(topology.meta.clone());

    let json = gim_io::to_json_string(&case).unwrap();
    let back: SteadystateCase = gim_io::from_json_str(&json).unwrap();
    assert_eq!(case, back);
    assert!(back.is_valid_topology(&topology));
}

#[test]
fn test_topology_case_round_trip_and_consistency() {
    let topology = sample_topology();
    let mut case = TopologyCase::new(topology.meta.clone());
    case.elements = vec![
        ElementState::new("Load 1").disabled(),
        ElementState::new("Line HV").with_open_switches(vec!["S1".into()]),
    ];

    let json = gim_io::to_json_string(&case).unwrap();
    let back: TopologyCase = gim_io::from_json_str(&json).unwrap();
    assert_eq!(case, back);
    assert!(back.matches_topology(&topology));
}

#[test]
fn test_serialization_is_deterministic() {
    let topology = sample_topology();
    let a = gim_io::to_json_string(&topology).unwrap();
    let b = gim_io::to_json_string(&topology).unwrap();
    assert_eq!(a, b);

    // keys come out sorted: "branches" before "meta" before "nodes"
    let i_branches = a.find("\"branches\"").unwrap();
    let i_meta = a.find("\"meta\"").unwrap();
    let i_nodes = a.find("\"nodes\"").unwrap();
    assert!(i_branches < i_meta && i_meta < i_nodes);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("topology.json");

    let topology = sample_topology();
    gim_io::to_file(&topology, &path).unwrap();
    let back: Topology = gim_io::from_file(&path).unwrap();
    assert_eq!(topology, back);

    // overwrite semantics: writing again replaces the content
    gim_io::to_file(&back, &path).unwrap();
    let again: Topology = gim_io::from_file(&path).unwrap();
    assert_eq!(topology, again);
}

#[test]
fn test_nan_survives_the_wire() {
    let mut topology = sample_topology();
    topology.loads[0].rated_power.cos_phi.value = vec![f64::NAN, 0.95, 0.95];

    let json = gim_io::to_json_string(&topology).unwrap();
    assert!(json.contains("NaN"));

    let back: Topology = gim_io::from_json_str(&json).unwrap();
    let cos_phi = &back.loads[0].rated_power.cos_phi.value;
    assert!(cos_phi[0].is_nan());
    assert_eq!(cos_phi[1], 0.95);
}

#[test]
fn test_reference_tokens_accepted() {
    // value slots accept bare tokens, token strings and null alike
    let json = r#"{"value": [NaN, "NaN", null], "unit": "UNITLESS", "system_type": "NATURAL"}"#;
    let cos_phi: CosPhi = {
        let sanitized = gim_io::lenient::sanitize_nonfinite(json);
        serde_json::from_str(&sanitized).unwrap()
    };
    assert!(cos_phi.value.iter().all(|v| v.is_nan()));
}

#[test]
fn test_validation_failure_lists_all_paths() {
    let mut topology = sample_topology();
    topology.loads[0].rated_power.cos_phi.value = vec![1.5, 0.95, 0.95];
    topology.nodes[0].u_n.value = -1.0;

    let json = gim_io::to_json_string(&topology).unwrap();
    let err = gim_io::from_json_str::<Topology>(&json).unwrap_err();
    let GimError::Validation(diag) = err else {
        panic!("expected validation error");
    };
    let text = diag.to_string();
    assert!(text.contains("$.loads[0].rated_power.cos_phi.value[0]"));
    assert!(text.contains("$.nodes[0].u_n.value"));
}

#[test]
fn test_mismatched_case_reports_false_not_error() {
    let topology = sample_topology();
    let mut case = sample_steadystate(topology.meta.clone());
    case.loads[0].name = "Load 99".into();
    assert!(!case.is_valid_topology(&topology));
}
