use super::*;

fn edges() -> Edges {
    Edges {
        left: 1.0,
        top: 2.0,
        right: 3.0,
        bottom: 4.0,
    }
}

#[test]
fn row_maps_to_width_and_column_to_height() {
    let row = FlowAxis::main(FlexDirection::Row, Direction::Ltr);
    assert_eq!(row.axis, Axis::Row);
    assert!(!row.reversed);
    assert_eq!(FlowAxis::cross_of(row, Direction::Ltr).axis, Axis::Column);

    let col = FlowAxis::main(FlexDirection::Column, Direction::Ltr);
    assert_eq!(col.axis, Axis::Column);
    assert_eq!(FlowAxis::cross_of(col, Direction::Ltr).axis, Axis::Row);
}

#[test]
fn reverse_directions_only_flip_flow() {
    let rr = FlowAxis::main(FlexDirection::RowReverse, Direction::Ltr);
    assert_eq!(rr.axis, Axis::Row);
    assert!(rr.reversed);

    let cr = FlowAxis::main(FlexDirection::ColumnReverse, Direction::Rtl);
    assert_eq!(cr.axis, Axis::Column);
    assert!(cr.reversed);
}

#[test]
fn rtl_flips_row_directions_and_column_cross() {
    assert!(FlowAxis::main(FlexDirection::Row, Direction::Rtl).reversed);
    assert!(!FlowAxis::main(FlexDirection::RowReverse, Direction::Rtl).reversed);

    let col = FlowAxis::main(FlexDirection::Column, Direction::Rtl);
    assert!(FlowAxis::cross_of(col, Direction::Rtl).reversed);
}

#[test]
fn leading_and_trailing_follow_flow() {
    let e = edges();
    let row = FlowAxis::physical(Axis::Row);
    assert_eq!((e.leading(row), e.trailing(row)), (1.0, 3.0));

    let row_rev = FlowAxis {
        axis: Axis::Row,
        reversed: true,
    };
    assert_eq!((e.leading(row_rev), e.trailing(row_rev)), (3.0, 1.0));

    let col_rev = FlowAxis {
        axis: Axis::Column,
        reversed: true,
    };
    assert_eq!((e.leading(col_rev), e.trailing(col_rev)), (4.0, 2.0));
    assert_eq!(e.sum(Axis::Row), 4.0);
    assert_eq!(e.sum(Axis::Column), 6.0);
}
