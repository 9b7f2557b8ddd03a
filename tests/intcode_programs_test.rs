// Whole-program tests: known Intcode programs run through the public API.

use intcode::program::parse_program;
use intcode::{Computer, Machine, MachineConfig, Status};
use test_log::test;

const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";

const COMPARE_WITH_EIGHT: &str = "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,\
1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,999,1105,1,46,1101,1000,1,20,4,20,\
1105,1,46,98,99";

const AMPLIFIER: &str = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";

const FEEDBACK_AMPLIFIER: &str = "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,\
1001,28,-1,28,1005,28,6,99,0,0,5";

fn run_to_halt(text: &str, input: &[i64]) -> Vec<i64> {
    let program = parse_program(text).unwrap();
    let mut machine = Machine::new(&program);
    let result = machine.run(input).unwrap();
    assert_eq!(result.status, Status::Halted);
    result.outputs
}

#[test]
fn test_quine_outputs_itself() {
    let program = parse_program(QUINE).unwrap();
    assert_eq!(run_to_halt(QUINE, &[]), program);
}

#[test]
fn test_sixteen_digit_product() {
    let outputs = run_to_halt("1102,34915192,34915192,7,4,7,99,0", &[]);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].to_string().len(), 16);
}

#[test]
fn test_self_modifying_arithmetic() {
    let mut machine = Machine::new(&parse_program("1,9,10,3,2,3,11,0,99,30,40,50").unwrap());
    assert!(machine.run(&[]).unwrap().is_halted());
    assert_eq!(machine.peek(0), 3500);

    let mut machine = Machine::new(&parse_program("1,1,1,4,99,5,6,0,99").unwrap());
    machine.run(&[]).unwrap();
    assert_eq!(
        machine.memory().snapshot(0..9),
        vec![30, 1, 1, 4, 2, 5, 6, 0, 99]
    );
}

#[test]
fn test_comparisons_and_jumps() {
    assert_eq!(run_to_halt("3,9,8,9,10,9,4,9,99,-1,8", &[8]), vec![1]);
    assert_eq!(run_to_halt("3,9,8,9,10,9,4,9,99,-1,8", &[7]), vec![0]);
    assert_eq!(run_to_halt("3,3,1107,-1,8,3,4,3,99", &[5]), vec![1]);
    assert_eq!(run_to_halt("3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", &[0]), vec![0]);
    assert_eq!(run_to_halt("3,3,1105,-1,9,1101,0,0,12,4,12,99,1", &[4]), vec![1]);

    assert_eq!(run_to_halt(COMPARE_WITH_EIGHT, &[7]), vec![999]);
    assert_eq!(run_to_halt(COMPARE_WITH_EIGHT, &[8]), vec![1000]);
    assert_eq!(run_to_halt(COMPARE_WITH_EIGHT, &[9]), vec![1001]);
}

#[test]
fn test_two_inputs_resume_without_rereading() {
    // outputs both inputs in the order they were read
    let mut machine = Machine::new(&parse_program("3,11,3,12,4,11,4,12,99,0,0,0,0").unwrap());

    let first = machine.run(&[5]).unwrap();
    assert_eq!(first.status, Status::Blocked);
    assert_eq!(first.inputs_consumed, 1);
    assert!(first.outputs.is_empty());

    let second = machine.run(&[7]).unwrap();
    assert_eq!(second.status, Status::Halted);
    assert_eq!(second.inputs_consumed, 1);
    assert_eq!(second.outputs, vec![5, 7]);
}

#[test]
fn test_reset_gives_identical_runs() {
    let program = parse_program(COMPARE_WITH_EIGHT).unwrap();
    let mut machine = Machine::new(&program);

    machine.run(&[8]).unwrap();
    let first = machine.drain_output();

    machine.reset();
    assert_eq!(machine.instruction_pointer(), 0);
    assert_eq!(machine.relative_base(), 0);
    assert_eq!(machine.status(), Status::Running);

    machine.run(&[8]).unwrap();
    let second = machine.drain_output();
    assert_eq!(first, second);
    assert_eq!(first, vec![1000]);
}

#[test]
fn test_reset_keeps_output_history() {
    let mut machine = Machine::new(&[104, 3, 99]);
    machine.run(&[]).unwrap();
    machine.reset();
    assert_eq!(machine.run(&[]).unwrap().outputs, vec![3, 3]);
}

#[test]
fn test_legacy_halt_output_through_computer() {
    let mut computer = Computer::with_config(MachineConfig {
        legacy_halt_output: true,
    });
    let index = computer.add_program(&parse_program(AMPLIFIER).unwrap());
    computer.run_program(index, &[0, 0]).unwrap();
    assert_eq!(computer.take_output(index).unwrap(), vec![0, 0]);
}

#[test]
fn test_amplifier_chain() {
    let program = parse_program(AMPLIFIER).unwrap();
    let mut signal = 0;
    for phase in [4, 3, 2, 1, 0] {
        let mut machine = Machine::new(&program);
        let result = machine.run(&[phase, signal]).unwrap();
        signal = result.outputs[0];
    }
    assert_eq!(signal, 43210);
}

#[test]
fn test_amplifier_feedback_loop_round_robin() {
    let program = parse_program(FEEDBACK_AMPLIFIER).unwrap();
    let mut computer = Computer::new();
    for phase in [9, 8, 7, 6, 5] {
        let index = computer.add_program(&program);
        let result = computer.run_program(index, &[phase]).unwrap();
        assert!(result.is_blocked());
    }

    let mut signal = vec![0];
    let mut last_signal = 0;
    while !computer.is_last_complete() {
        for index in 0..computer.len() {
            computer.run_program(index, &signal).unwrap();
            signal = computer.take_output(index).unwrap();
        }
        last_signal = *signal.last().unwrap();
    }

    assert!(computer.all_complete());
    assert_eq!(last_signal, 139629729);
}

#[test]
fn test_machines_run_on_separate_threads() {
    let program = parse_program(COMPARE_WITH_EIGHT).unwrap();
    let handles: Vec<_> = [6, 8, 10]
        .into_iter()
        .map(|input| {
            let mut machine = Machine::new(&program);
            std::thread::spawn(move || machine.run(&[input]).unwrap().outputs)
        })
        .collect();

    let outputs: Vec<Vec<i64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs, vec![vec![999], vec![1000], vec![1001]]);
}
